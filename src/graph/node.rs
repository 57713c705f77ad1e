//! Graph nodes as seen by connections and layout engines
//!
//! Nodes here carry only what connections need from them: bounds for anchor
//! resolution and the registries of incoming and outgoing connections.

use std::any::Any;
use std::fmt;

use indexmap::IndexSet;

use crate::geometry::{BoundingBox, Point};
use crate::layout::LayoutEntity;

use super::{ConnectionId, NodeId};

/// A node in a graph container
pub struct Node {
    id: NodeId,
    text: String,
    bounds: BoundingBox,
    visible: bool,
    /// Connections leaving this node, in registration order
    source_connections: IndexSet<ConnectionId>,
    /// Connections arriving at this node, in registration order
    target_connections: IndexSet<ConnectionId>,
    layout_information: Option<Box<dyn Any>>,
}

impl Node {
    pub(crate) fn new(id: NodeId, text: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            id,
            text: text.into(),
            bounds,
            visible: true,
            source_connections: IndexSet::new(),
            target_connections: IndexSet::new(),
            layout_information: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    pub fn set_location(&mut self, location: Point) {
        self.bounds.x = location.x;
        self.bounds.y = location.y;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible_flag(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Connections whose source is this node
    pub fn source_connections(&self) -> &IndexSet<ConnectionId> {
        &self.source_connections
    }

    /// Connections whose destination is this node
    pub fn target_connections(&self) -> &IndexSet<ConnectionId> {
        &self.target_connections
    }

    pub(crate) fn add_source_connection(&mut self, connection: ConnectionId) {
        self.source_connections.insert(connection);
    }

    pub(crate) fn remove_source_connection(&mut self, connection: ConnectionId) {
        self.source_connections.shift_remove(&connection);
    }

    pub(crate) fn add_target_connection(&mut self, connection: ConnectionId) {
        self.target_connections.insert(connection);
    }

    pub(crate) fn remove_target_connection(&mut self, connection: ConnectionId) {
        self.target_connections.shift_remove(&connection);
    }
}

impl LayoutEntity for Node {
    fn x_in_layout(&self) -> f64 {
        self.bounds.x
    }

    fn y_in_layout(&self) -> f64 {
        self.bounds.y
    }

    fn width_in_layout(&self) -> f64 {
        self.bounds.width
    }

    fn height_in_layout(&self) -> f64 {
        self.bounds.height
    }

    fn set_location_in_layout(&mut self, x: f64, y: f64) {
        self.set_location(Point::new(x, y));
    }

    fn set_size_in_layout(&mut self, width: f64, height: f64) {
        self.bounds.width = width;
        self.bounds.height = height;
    }

    fn layout_information(&self) -> Option<&dyn Any> {
        self.layout_information.as_deref()
    }

    fn set_layout_information(&mut self, information: Option<Box<dyn Any>>) {
        self.layout_information = information;
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("bounds", &self.bounds)
            .field("visible", &self.visible)
            .field("source_connections", &self.source_connections)
            .field("target_connections", &self.target_connections)
            .finish_non_exhaustive()
    }
}
