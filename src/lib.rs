//! Diagram Graph - connections, snapping and previews for node-link diagrams
//!
//! This library provides a graph container whose connections keep their
//! drawable figure in sync with their style, a chain-of-strategies snap
//! resolver for dragging, and an SVG preview renderer.
//!
//! # Example
//!
//! ```rust
//! use diagram_graph::render;
//!
//! let svg = render(&["server->client"]).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod description;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod renderer;
pub mod snap;
pub mod style;
pub mod stylesheet;

pub use description::{DescriptionError, EdgeSpec, NodeMove};
pub use error::GraphError;
pub use geometry::{BoundingBox, Point};
pub use graph::{Connection, ConnectionId, ConnectionMut, Graph, GraphConfig, NodeId};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};
pub use snap::{
    CompoundSnapStrategy, SnapError, SnapOrientation, SnapRequest, SnapStrategy, SnapToGeometry,
    SnapToGrid,
};
pub use style::{Color, ConnectionStyle, LineStyle};

use log::debug;
use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the preview pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// An edge or move argument could not be read
    #[error(transparent)]
    Description(#[from] DescriptionError),

    /// A move names a node that no edge mentions
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("snap error: {0}")]
    Snap(#[from] SnapError),
}

/// Configuration for the complete preview pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Defaults for nodes and connections
    pub graph: GraphConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Grid spacing used when dragging nodes; no grid snapping if unset
    pub grid: Option<f64>,
    /// Node drags applied after the graph is built
    pub moves: Vec<NodeMove>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the graph configuration
    pub fn with_graph(mut self, config: GraphConfig) -> Self {
        self.graph = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet; its palette is also applied to the graph defaults
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.graph = self.graph.with_stylesheet(&stylesheet);
        self.stylesheet = stylesheet;
        self
    }

    pub fn with_grid(mut self, spacing: f64) -> Self {
        self.grid = Some(spacing);
        self
    }

    pub fn with_move(mut self, node_move: NodeMove) -> Self {
        self.moves.push(node_move);
        self
    }
}

/// Build a graph from edge descriptions
///
/// Nodes are created in order of first mention and placed in a row using the
/// configured node size and spacing.
pub fn build_graph(edges: &[EdgeSpec], config: &GraphConfig) -> Result<Graph, RenderError> {
    let mut graph = Graph::new(config.clone());
    let (width, height) = config.node_size;

    for edge in edges {
        let mut ends = [NodeId(0); 2];
        for (slot, name) in ends.iter_mut().zip([&edge.source, &edge.target]) {
            *slot = match graph.find_node(name) {
                Some(id) => id,
                None => {
                    let x = graph.node_count() as f64 * (width + config.node_spacing);
                    graph.add_node_with_bounds(name.as_str(), BoundingBox::new(x, 0.0, width, height))
                }
            };
        }

        let style = if edge.directed {
            ConnectionStyle::DIRECTED
        } else {
            ConnectionStyle::SOLID
        };
        graph.connect(style, ends[0], ends[1])?;
    }

    debug!(
        "built graph with {} nodes and {} connections",
        graph.node_count(),
        graph.connection_count()
    );
    Ok(graph)
}

/// Drag a node to a new location through the snap chain
///
/// Other visible nodes act as geometry references. When `grid` is set, axes
/// the geometry left free are snapped to the grid. Returns the final location.
pub fn move_node(graph: &mut Graph, node_move: &NodeMove, grid: Option<f64>) -> Result<Point, RenderError> {
    let id = graph
        .find_node(&node_move.node)
        .ok_or_else(|| RenderError::UnknownNode(node_move.node.clone()))?;

    let references = graph
        .nodes()
        .filter(|n| n.id() != id && n.is_visible())
        .map(|n| *n.bounds())
        .collect();
    let mut strategies: Vec<Box<dyn SnapStrategy>> = vec![Box::new(SnapToGeometry::new(references))];
    if let Some(spacing) = grid {
        strategies.push(Box::new(SnapToGrid::square(spacing)?));
    }
    let chain = CompoundSnapStrategy::new(strategies)?;

    let current = *graph.node(id)?.bounds();
    let proposed = BoundingBox::new(node_move.to.x, node_move.to.y, current.width, current.height);
    let mut selection = proposed;
    let mut request = SnapRequest::default();
    let remaining = chain.snap_rectangle(
        &mut request,
        &proposed,
        &mut selection,
        false,
        SnapOrientation::TRANSLATION,
    );
    debug!(
        "moved '{}' to {:?} (unsnapped: {:?})",
        node_move.node,
        selection.location(),
        remaining
    );

    graph.node_mut(id)?.set_location(selection.location());
    Ok(selection.location())
}

/// Render edge descriptions to SVG with default configuration
///
/// # Example
///
/// ```rust
/// use diagram_graph::render;
///
/// let svg = render(&["server->client", "client--cache"]).unwrap();
///
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("server"));
/// assert!(svg.contains("cache"));
/// ```
pub fn render(edges: &[&str]) -> Result<String, RenderError> {
    render_with_config(edges, RenderConfig::default())
}

/// Render edge descriptions to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use diagram_graph::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_grid(10.0)
///     .with_move("b=203,48".parse().unwrap())
///     .with_svg(SvgConfig::default().with_viewbox_padding(50.0));
///
/// let svg = render_with_config(&["a->b"], config).unwrap();
/// assert!(svg.contains(r#"x="200" y="50""#));
/// ```
pub fn render_with_config(edges: &[&str], config: RenderConfig) -> Result<String, RenderError> {
    let edges = edges
        .iter()
        .map(|e| e.parse::<EdgeSpec>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut graph = build_graph(&edges, &config.graph)?;

    for node_move in &config.moves {
        move_node(&mut graph, node_move, config.grid)?;
    }

    let svg = render_svg_with_stylesheet(&graph, &config.svg, &config.stylesheet);

    Ok(svg)
}
