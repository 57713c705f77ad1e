//! Graph container owning nodes and connections
//!
//! The container is the single owner of every node and connection. Nodes keep
//! ordered registries of the connection handles attached to them, connections
//! keep the handles of their two endpoints, and nothing holds a reference back
//! into the container. Mutations that need the container (highlighting,
//! visibility, disposal) go through a [`ConnectionMut`] handle.

pub mod config;
pub mod connection;
pub mod figure;
pub mod handle;
pub mod node;

pub use config::GraphConfig;
pub use connection::Connection;
pub use figure::{ChopboxAnchor, ConnectionFigure, FigureKind, PolygonDecoration, Route};
pub use handle::ConnectionMut;
pub use node::Node;

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use crate::error::GraphError;
use crate::geometry::BoundingBox;
use crate::style::{Color, ConnectionStyle};

/// Handle of a node inside one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle of a connection inside one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection#{}", self.0)
    }
}

/// Any item whose visibility the container tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphItem {
    Node(NodeId),
    Connection(ConnectionId),
}

/// The graph container
#[derive(Debug)]
pub struct Graph {
    config: GraphConfig,
    nodes: IndexMap<NodeId, Node>,
    connections: IndexMap<ConnectionId, Connection>,
    highlighted: IndexSet<ConnectionId>,
    highlight_transitions: usize,
    visible_items: IndexSet<GraphItem>,
    next_node: u64,
    next_connection: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl Graph {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            highlighted: IndexSet::new(),
            highlight_transitions: 0,
            visible_items: IndexSet::new(),
            next_node: 0,
            next_connection: 0,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Style bits every new connection inherits
    pub fn connection_style(&self) -> ConnectionStyle {
        self.config.connection_style
    }

    /// Change the inherited style; existing connections are not touched
    pub fn set_connection_style(&mut self, style: ConnectionStyle) {
        self.config.connection_style = style;
    }

    pub fn highlight_color(&self) -> Color {
        self.config.highlight_color
    }

    // ---- nodes -------------------------------------------------------------

    /// Add a node of the default size at the origin
    pub fn add_node(&mut self, text: impl Into<String>) -> NodeId {
        let (width, height) = self.config.node_size;
        self.add_node_with_bounds(text, BoundingBox::new(0.0, 0.0, width, height))
    }

    pub fn add_node_with_bounds(&mut self, text: impl Into<String>, bounds: BoundingBox) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;

        let node = Node::new(id, text, bounds);
        trace!("add {} '{}' at {:?}", id, node.text(), bounds);
        self.nodes.insert(id, node);
        self.visible_items.insert(GraphItem::Node(id));
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        match self.nodes.get(&id) {
            Some(node) => Ok(node),
            None => Err(self.missing_node(id)),
        }
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        if !self.nodes.contains_key(&id) {
            return Err(self.missing_node(id));
        }
        Ok(&mut self.nodes[&id])
    }

    /// Find the first node with the given text
    pub fn find_node(&self, text: &str) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.text() == text)
            .map(|n| n.id())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Remove a node, disposing every connection attached to it first
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self.node(id)?;
        let attached: IndexSet<ConnectionId> = node
            .source_connections()
            .iter()
            .chain(node.target_connections().iter())
            .copied()
            .collect();

        for connection in attached {
            self.dispose_connection(connection)?;
        }

        self.nodes.shift_remove(&id);
        self.visible_items.shift_remove(&GraphItem::Node(id));
        debug!("removed {}", id);
        Ok(())
    }

    pub fn set_node_visible(&mut self, id: NodeId, visible: bool) -> Result<(), GraphError> {
        self.node(id)?;
        self.set_item_visible(GraphItem::Node(id), visible);
        self.nodes[&id].set_visible_flag(visible);
        Ok(())
    }

    // ---- connections -------------------------------------------------------

    /// Create a connection from `source` to `destination`.
    ///
    /// The new connection inherits this graph's connection style, registers
    /// itself with both endpoints and the container, and builds its figure
    /// before this returns. Fails if either endpoint is not a live node.
    pub fn connect(
        &mut self,
        style: ConnectionStyle,
        source: NodeId,
        destination: NodeId,
    ) -> Result<ConnectionId, GraphError> {
        self.node(source)?;
        self.node(destination)?;

        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;

        self.nodes[&source].add_source_connection(id);
        self.nodes[&destination].add_target_connection(id);
        let connection = Connection::new(id, &self.config, style, source, destination);
        self.add_connection(connection);

        debug!("connected {} -> {} as {}", source, destination, id);
        Ok(id)
    }

    pub fn connection(&self, id: ConnectionId) -> Result<&Connection, GraphError> {
        match self.connections.get(&id) {
            Some(connection) => Ok(connection),
            None => Err(self.missing_connection(id)),
        }
    }

    /// Mutable handle to a live connection
    pub fn connection_mut(&mut self, id: ConnectionId) -> Result<ConnectionMut<'_>, GraphError> {
        if !self.connections.contains_key(&id) {
            return Err(self.missing_connection(id));
        }
        Ok(ConnectionMut::new(self, id))
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether the handle was issued by this graph and has since been disposed
    pub fn is_disposed(&self, id: ConnectionId) -> bool {
        id.0 < self.next_connection && !self.connections.contains_key(&id)
    }

    /// Dispose a connection: deregister it from both endpoints and the container
    pub fn dispose_connection(&mut self, id: ConnectionId) -> Result<(), GraphError> {
        let (source, destination) = {
            let connection = self.connection(id)?;
            (connection.source(), connection.destination())
        };

        if let Some(node) = self.nodes.get_mut(&source) {
            node.remove_source_connection(id);
        }
        if let Some(node) = self.nodes.get_mut(&destination) {
            node.remove_target_connection(id);
        }
        self.remove_connection(id);

        debug!("disposed {}", id);
        Ok(())
    }

    /// Human readable `text --> text` description using node labels
    pub fn describe_connection(&self, id: ConnectionId) -> Result<String, GraphError> {
        let connection = self.connection(id)?;
        let source = self.node(connection.source())?;
        let destination = self.node(connection.destination())?;
        let arrow = if connection.is_bidirectional() {
            "<-->"
        } else {
            "-->"
        };
        Ok(format!(
            "{} {} {} (weight={})",
            source.text(),
            arrow,
            destination.text(),
            connection.weight()
        ))
    }

    // ---- container bookkeeping ---------------------------------------------

    /// Connections currently highlighted, in highlight order
    pub fn highlighted_connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.highlighted.iter().copied()
    }

    /// Number of highlight and unhighlight notifications the container received
    pub fn highlight_transitions(&self) -> usize {
        self.highlight_transitions
    }

    pub fn is_item_visible(&self, item: GraphItem) -> bool {
        self.visible_items.contains(&item)
    }

    /// Items currently shown, in the order they became visible
    pub fn visible_items(&self) -> impl Iterator<Item = GraphItem> + '_ {
        self.visible_items.iter().copied()
    }

    fn add_connection(&mut self, connection: Connection) {
        let id = connection.id();
        self.connections.insert(id, connection);
        self.visible_items.insert(GraphItem::Connection(id));
    }

    fn remove_connection(&mut self, id: ConnectionId) {
        self.connections.shift_remove(&id);
        self.highlighted.shift_remove(&id);
        self.visible_items.shift_remove(&GraphItem::Connection(id));
    }

    /// Record a highlight transition; returns false if it was already recorded
    pub(crate) fn highlight_edge(&mut self, id: ConnectionId) -> bool {
        let inserted = self.highlighted.insert(id);
        if inserted {
            self.highlight_transitions += 1;
            trace!("highlight {}", id);
        }
        inserted
    }

    pub(crate) fn unhighlight_edge(&mut self, id: ConnectionId) -> bool {
        let removed = self.highlighted.shift_remove(&id);
        if removed {
            self.highlight_transitions += 1;
            trace!("unhighlight {}", id);
        }
        removed
    }

    pub(crate) fn set_item_visible(&mut self, item: GraphItem, visible: bool) {
        let changed = if visible {
            self.visible_items.insert(item)
        } else {
            self.visible_items.shift_remove(&item)
        };
        if changed {
            trace!("{:?} visible={}", item, visible);
        }
    }

    fn missing_node(&self, id: NodeId) -> GraphError {
        if id.0 < self.next_node {
            GraphError::NodeDisposed(id)
        } else {
            GraphError::UnknownNode(id)
        }
    }

    fn missing_connection(&self, id: ConnectionId) -> GraphError {
        if id.0 < self.next_connection {
            GraphError::ConnectionDisposed(id)
        } else {
            GraphError::UnknownConnection(id)
        }
    }
}
