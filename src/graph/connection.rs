//! The connection entity: an edge between two nodes with its visual style
//!
//! Every setter that touches something visible pushes the full state into the
//! connection's [`ConnectionFigure`] before returning. There is no dirty flag;
//! the figure is always a projection of the latest state.

use std::any::Any;
use std::fmt;

use crate::geometry::Point;
use crate::layout::{
    clamp_weight, AttributeBag, EdgeConstraint, LayoutBendPoint, LayoutRelationship,
};
use crate::style::{Color, ConnectionStyle, LineStyle};

use super::config::GraphConfig;
use super::figure::{ConnectionFigure, PolygonDecoration};
use super::{ConnectionId, NodeId};

/// An edge between a source and a destination node
pub struct Connection {
    id: ConnectionId,
    source: NodeId,
    destination: NodeId,
    style: ConnectionStyle,
    weight: f64,
    /// Current stroke color; may differ from `foreground` after a temporary change
    line_color: Color,
    /// Permanent line color
    foreground: Color,
    highlight_color: Color,
    line_width: i32,
    line_style: LineStyle,
    curve_depth: i32,
    start_angle: f64,
    end_angle: f64,
    start_length: f64,
    end_length: f64,
    visible: bool,
    highlighted: bool,
    attributes: AttributeBag,
    layout_information: Option<Box<dyn Any>>,
    data: Option<Box<dyn Any>>,
    bend_points: Vec<LayoutBendPoint>,
    figure: ConnectionFigure,
}

impl Connection {
    /// Build a connection with the container's defaults and synchronize its figure.
    ///
    /// Registration with the endpoints and the container is the container's job.
    pub(crate) fn new(
        id: ConnectionId,
        config: &GraphConfig,
        style: ConnectionStyle,
        source: NodeId,
        destination: NodeId,
    ) -> Self {
        let style = style | config.connection_style;
        let mut connection = Self {
            id,
            source,
            destination,
            style,
            weight: clamp_weight(0.0),
            line_color: config.line_color,
            foreground: config.line_color,
            highlight_color: config.highlight_color,
            line_width: config.line_width,
            line_style: style.line_style().unwrap_or_default(),
            curve_depth: config.curve_depth,
            start_angle: 0.0,
            end_angle: 0.0,
            start_length: 0.0,
            end_length: 0.0,
            visible: true,
            highlighted: false,
            attributes: AttributeBag::new(),
            layout_information: None,
            data: None,
            bend_points: vec![],
            figure: ConnectionFigure::build(source, destination, config.anchor_corner_radius),
        };
        connection.update_figure();
        connection
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// Whether source and destination are the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }

    pub fn figure(&self) -> &ConnectionFigure {
        &self.figure
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Set the weight, clamped into `[0, 1] ∪ {-1}`
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = clamp_weight(weight);
    }

    pub fn connection_style(&self) -> ConnectionStyle {
        self.style
    }

    pub fn set_connection_style(&mut self, style: ConnectionStyle) {
        self.style = style;
        self.update_figure();
    }

    pub fn is_directed(&self) -> bool {
        self.style.is_directed()
    }

    pub fn is_bidirectional(&self) -> bool {
        !self.style.is_directed()
    }

    /// Current stroke color when not highlighted
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Permanently set the line color
    pub fn set_line_color(&mut self, color: Color) {
        self.foreground = color;
        self.change_line_color(color);
    }

    /// Temporarily change the line color; the permanent color is kept
    pub fn change_line_color(&mut self, color: Color) {
        self.line_color = color;
        self.update_figure();
    }

    /// Permanent line color
    pub fn foreground_color(&self) -> Color {
        self.foreground
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = color;
        self.update_figure();
    }

    pub fn line_width(&self) -> i32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: i32) {
        self.line_width = width;
        self.update_figure();
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
        self.update_figure();
    }

    /// Depth of the curve; only meaningful with [`ConnectionStyle::CURVED`]
    /// or on self-loops
    pub fn curve_depth(&self) -> i32 {
        self.curve_depth
    }

    pub fn set_curve_depth(&mut self, depth: i32) {
        self.curve_depth = depth;
        self.update_figure();
    }

    // Bezier hints. Advisory only: the figure does not draw beziers.

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn set_start_angle(&mut self, angle: f64) {
        self.start_angle = angle;
        self.update_figure();
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn set_end_angle(&mut self, angle: f64) {
        self.end_angle = angle;
        self.update_figure();
    }

    /// Ratio (0-1) of the start control arm to the connection length
    pub fn start_length(&self) -> f64 {
        self.start_length
    }

    pub fn set_start_length(&mut self, length: f64) {
        self.start_length = length;
        self.update_figure();
    }

    /// Ratio (0-1) of the end control arm to the connection length
    pub fn end_length(&self) -> f64 {
        self.end_length
    }

    pub fn set_end_length(&mut self, length: f64) {
        self.end_length = length;
        self.update_figure();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn bend_points(&self) -> &[LayoutBendPoint] {
        &self.bend_points
    }

    /// Opaque user object attached to this connection
    pub fn data(&self) -> Option<&dyn Any> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, data: Option<Box<dyn Any>>) {
        self.data = data;
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub(crate) fn set_highlighted_flag(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        self.update_figure();
    }

    pub(crate) fn set_visible_flag(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Push the complete visual state into the figure
    fn update_figure(&mut self) {
        let stroke = if self.highlighted {
            self.highlight_color
        } else {
            self.line_color
        };
        let decoration = self
            .style
            .is_directed()
            .then(|| PolygonDecoration::arrow_for_width(self.line_width));
        // the polyline passes through every vertex, so control points stay out
        let bends = self
            .bend_points
            .iter()
            .filter(|b| !b.is_control_point)
            .map(|b| Point::new(b.x, b.y))
            .collect();

        let figure = &mut self.figure;
        figure.set_line_width(self.line_width);
        figure.set_line_style(self.line_style);
        figure.set_foreground(stroke);
        if figure.is_curve_capable() {
            figure.set_depth(self.curve_depth);
        }
        figure.set_target_decoration(decoration);
        figure.set_routing_constraint(bends);
        figure.mark_synchronized();
    }
}

impl LayoutRelationship for Connection {
    fn source_in_layout(&self) -> NodeId {
        self.source
    }

    fn destination_in_layout(&self) -> NodeId {
        self.destination
    }

    fn is_bidirectional_in_layout(&self) -> bool {
        self.is_bidirectional()
    }

    fn weight_in_layout(&self) -> f64 {
        self.weight
    }

    fn set_weight_in_layout(&mut self, weight: f64) {
        self.set_weight(weight);
    }

    fn attribute_in_layout(&self, key: &str) -> Option<&dyn Any> {
        self.attributes.get(key)
    }

    fn set_attribute_in_layout(&mut self, key: String, value: Box<dyn Any>) {
        self.attributes.insert(key, value);
    }

    fn layout_information(&self) -> Option<&dyn Any> {
        self.layout_information.as_deref()
    }

    fn set_layout_information(&mut self, information: Option<Box<dyn Any>>) {
        self.layout_information = information;
    }

    fn set_bend_points(&mut self, bend_points: &[LayoutBendPoint]) {
        self.bend_points = bend_points.to_vec();
        self.update_figure();
    }

    fn clear_bend_points(&mut self) {
        if self.bend_points.is_empty() {
            return;
        }
        self.bend_points.clear();
        self.update_figure();
    }

    fn populate_layout_constraint(&self, constraint: &mut EdgeConstraint) {
        constraint.weight = self.weight;
        constraint.is_bidirectional = self.is_bidirectional();
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.is_bidirectional() { "<-->" } else { "-->" };
        write!(
            f,
            "{} {} {} (weight={})",
            self.source, arrow, self.destination, self.weight
        )
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("style", &self.style)
            .field("weight", &self.weight)
            .field("line_color", &self.line_color)
            .field("highlight_color", &self.highlight_color)
            .field("line_width", &self.line_width)
            .field("line_style", &self.line_style)
            .field("curve_depth", &self.curve_depth)
            .field("visible", &self.visible)
            .field("highlighted", &self.highlighted)
            .field("attributes", &self.attributes)
            .field("bend_points", &self.bend_points)
            .field("figure", &self.figure)
            .finish_non_exhaustive()
    }
}
