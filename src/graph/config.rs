//! Defaults applied by a graph container to the items it creates

use crate::style::{Color, ConnectionStyle};
use crate::stylesheet::Stylesheet;

/// Configuration options for a graph container
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Style bits OR-ed into every new connection
    pub connection_style: ConnectionStyle,

    /// Stroke color of connections that are not highlighted
    pub line_color: Color,

    /// Stroke color of highlighted connections
    pub highlight_color: Color,

    /// Line width of new connections
    pub line_width: i32,

    /// Depth of self-loop arcs
    pub curve_depth: i32,

    /// Corner radius used by connection anchors
    pub anchor_corner_radius: f64,

    /// Default node size (width, height)
    pub node_size: (f64, f64),

    /// Horizontal gap used when nodes are placed automatically
    pub node_spacing: f64,

    /// Node fill and outline colors, used by the preview renderer
    pub node_fill: Color,
    pub node_stroke: Color,
    pub text_color: Color,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            connection_style: ConnectionStyle::SOLID,
            line_color: Color::LIGHT_GRAY,
            highlight_color: Color::DARK_BLUE,
            line_width: 1,
            curve_depth: 20,
            anchor_corner_radius: 8.0,
            node_size: (80.0, 30.0),
            node_spacing: 40.0,
            node_fill: Color::rgb(0xf0, 0xf0, 0xf0),
            node_stroke: Color::rgb(0x33, 0x33, 0x33),
            text_color: Color::rgb(0x33, 0x33, 0x33),
        }
    }
}

impl GraphConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style bits every new connection inherits
    pub fn with_connection_style(mut self, style: ConnectionStyle) -> Self {
        self.connection_style = style;
        self
    }

    /// Set the default connection line color
    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    /// Set the default highlight color
    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    /// Set the default line width
    pub fn with_line_width(mut self, width: i32) -> Self {
        self.line_width = width;
        self
    }

    /// Set the default self-loop depth
    pub fn with_curve_depth(mut self, depth: i32) -> Self {
        self.curve_depth = depth;
        self
    }

    /// Set the default node size
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_size = (width, height);
        self
    }

    /// Set the gap between automatically placed nodes
    pub fn with_node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = spacing;
        self
    }

    /// Take colors from a stylesheet; tokens it does not define keep their
    /// palette default
    pub fn with_stylesheet(mut self, stylesheet: &Stylesheet) -> Self {
        self.line_color = stylesheet.color_or_default("connection-line");
        self.highlight_color = stylesheet.color_or_default("connection-highlight");
        self.node_fill = stylesheet.color_or_default("node-fill");
        self.node_stroke = stylesheet.color_or_default("node-stroke");
        self.text_color = stylesheet.color_or_default("text");
        self
    }
}
