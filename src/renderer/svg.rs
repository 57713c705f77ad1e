//! SVG generation from a graph

use log::trace;

use crate::geometry::{BoundingBox, Point};
use crate::graph::{Connection, Graph, GraphItem, Node, Route};
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Prefix for every CSS class the renderer emits
const CLASS_PREFIX: &str = "dg-";

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    nodes: Vec<String>,
    connections: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            nodes: vec![],
            connections: vec![],
        }
    }

    /// Add CSS custom properties from a stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut tokens: Vec<_> = stylesheet.colors.iter().collect();
        tokens.sort_by(|a, b| a.0.cmp(b.0));

        let mut css = String::from(":root {\n");
        for (token, value) in tokens {
            css.push_str(&format!("    --{}: {};\n", token, value));
        }
        css.push_str("  }");
        self.styles.push(css);
    }

    fn class_list(&self, base: &str, classes: &[String]) -> String {
        std::iter::once(format!("{}{}", CLASS_PREFIX, base))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add a node rectangle
    pub fn add_node(&mut self, id: &str, bounds: &BoundingBox, classes: &[String], styles: &str) {
        let class_list = self.class_list("node", classes);
        self.nodes.push(format!(
            r#"  <rect id="{}" class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            id,
            class_list,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            styles
        ));
    }

    /// Add a text label centered on a point
    pub fn add_text(&mut self, text: &str, at: Point, styles: &str) {
        self.nodes.push(format!(
            r#"  <text class="{}label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle"{}>{}</text>"#,
            CLASS_PREFIX,
            at.x,
            at.y,
            styles,
            escape_xml(text)
        ));
    }

    /// Add a connection path
    pub fn add_connection_path(&mut self, id: &str, d: &str, classes: &[String], styles: &str) {
        let class_list = self.class_list("connection", classes);
        self.connections.push(format!(
            r#"  <path id="{}" class="{}" d="{}" fill="none"{}/>"#,
            id,
            class_list,
            d,
            styles
        ));
    }

    /// Add the arrow head of a directed connection
    pub fn add_decoration(&mut self, points: &[Point], styles: &str) {
        let points_str = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.connections.push(format!(
            r#"  <polygon class="{}decoration" points="{}"{}/>"#,
            CLASS_PREFIX,
            points_str,
            styles
        ));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let mut svg = String::new();
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push('\n');

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push('\n');
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push('\n');
            }
            svg.push_str("  </style>");
            svg.push('\n');
        }

        for node in &self.nodes {
            svg.push_str(node);
            svg.push('\n');
        }

        // Connections are drawn over the nodes they attach to
        for conn in &self.connections {
            svg.push_str(conn);
            svg.push('\n');
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render a graph to an SVG string (with default stylesheet)
pub fn render_svg(graph: &Graph, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(graph, config, &Stylesheet::default())
}

/// Render a graph to an SVG string with a custom stylesheet
pub fn render_svg_with_stylesheet(graph: &Graph, config: &SvgConfig, stylesheet: &Stylesheet) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    let mut extent: Option<BoundingBox> = None;

    for node in graph.nodes() {
        let visible = graph.is_item_visible(GraphItem::Node(node.id()));
        if !visible && !config.include_hidden {
            continue;
        }
        render_node(graph, node, visible, &mut builder);
        extent = Some(match extent {
            Some(b) => b.union(node.bounds()),
            None => *node.bounds(),
        });
    }

    for conn in graph.connections() {
        let visible = graph.is_item_visible(GraphItem::Connection(conn.id()))
            && graph.is_item_visible(GraphItem::Node(conn.source()))
            && graph.is_item_visible(GraphItem::Node(conn.destination()));
        if !visible && !config.include_hidden {
            continue;
        }
        let (Ok(source), Ok(target)) = (graph.node(conn.source()), graph.node(conn.destination()))
        else {
            continue;
        };

        let route = conn.figure().route(source.bounds(), target.bounds());
        if let Route::Loop {
            control_start,
            control_end,
            ..
        } = &route
        {
            if let Some(b) = extent.as_mut() {
                *b = b.expand_to_include(*control_start).expand_to_include(*control_end);
            }
        }
        render_connection(conn, &route, visible, &mut builder);
    }

    trace!(
        "rendered {} nodes and {} connections",
        graph.node_count(),
        graph.connection_count()
    );
    builder.build(extent.unwrap_or_else(BoundingBox::zero))
}

fn render_node(graph: &Graph, node: &Node, visible: bool, builder: &mut SvgBuilder) {
    let config = graph.config();
    let mut classes = vec![];
    if !visible {
        classes.push(format!("{}hidden", CLASS_PREFIX));
    }
    let styles = format!(
        r#" fill="{}" stroke="{}""#,
        config.node_fill, config.node_stroke
    );
    let id = node.id().to_string().replace('#', "-");
    builder.add_node(&id, node.bounds(), &classes, &styles);
    builder.add_text(
        node.text(),
        node.bounds().center(),
        &format!(r#" fill="{}""#, config.text_color),
    );
}

fn render_connection(conn: &Connection, route: &Route, visible: bool, builder: &mut SvgBuilder) {
    let figure = conn.figure();
    let prefix = CLASS_PREFIX;

    let mut classes = vec![];
    if conn.is_directed() {
        classes.push(format!("{}directed", prefix));
    }
    if conn.is_highlighted() {
        classes.push(format!("{}highlighted", prefix));
    }
    if !visible {
        classes.push(format!("{}hidden", prefix));
    }

    let mut styles = format!(
        r#" stroke="{}" stroke-width="{}""#,
        figure.foreground(),
        figure.line_width().max(1)
    );
    if let Some(dashes) = figure.line_style().dash_array() {
        styles.push_str(&format!(r#" stroke-dasharray="{}""#, dashes));
    }

    let id = conn.id().to_string().replace('#', "-");
    builder.add_connection_path(&id, &route_to_d(route), &classes, &styles);

    if let (Some(decoration), Some((from, tip))) =
        (figure.target_decoration(), route.terminal_segment())
    {
        let fill = format!(r#" fill="{}""#, figure.foreground());
        builder.add_decoration(&decoration.points(tip, from), &fill);
    }
}

/// Convert a route to an SVG path d attribute
fn route_to_d(route: &Route) -> String {
    match route {
        Route::Polyline(path) => {
            let Some((first, rest)) = path.split_first() else {
                return String::new();
            };
            let mut d = format!("M{} {}", first.x, first.y);
            for point in rest {
                d.push_str(&format!(" L{} {}", point.x, point.y));
            }
            d
        }
        Route::Loop {
            start,
            control_start,
            control_end,
            end,
        } => format!(
            "M{} {} C{} {} {} {} {} {}",
            start.x, start.y, control_start.x, control_start.y, control_end.x, control_end.y, end.x, end.y
        ),
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
