//! Derived visual objects for connections
//!
//! A [`ConnectionFigure`] is owned by its connection and is never edited
//! directly by callers; the connection pushes its state into it after every
//! mutation. The variant (polyline or self-loop arc) and the two anchors are
//! fixed when the figure is built.

use crate::geometry::{BoundingBox, Point};
use crate::style::{Color, LineStyle};

use super::NodeId;

/// Boundary anchor on a node's bounds, with rounded corners
///
/// The anchor stores only the node handle; the bounds are supplied when the
/// location is resolved so that anchors follow nodes as they move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChopboxAnchor {
    owner: NodeId,
    corner_radius: f64,
}

impl ChopboxAnchor {
    pub fn new(owner: NodeId, corner_radius: f64) -> Self {
        Self {
            owner,
            corner_radius: corner_radius.max(0.0),
        }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Point where the ray from the center of `bounds` towards `reference`
    /// leaves the (rounded) box
    pub fn location(&self, bounds: &BoundingBox, reference: Point) -> Point {
        let center = bounds.center();
        if bounds.width <= 0.0 || bounds.height <= 0.0 || reference == center {
            return center;
        }

        let dx = reference.x - center.x;
        let dy = reference.y - center.y;
        let scale = 0.5 / (dx.abs() / bounds.width).max(dy.abs() / bounds.height);
        let hit = Point::new(center.x + dx * scale, center.y + dy * scale);

        self.round_corner(bounds, hit)
    }

    /// Pull a point that falls inside a corner square back onto the corner arc
    fn round_corner(&self, bounds: &BoundingBox, hit: Point) -> Point {
        let r = self
            .corner_radius
            .min(bounds.width / 2.0)
            .min(bounds.height / 2.0);
        if r <= 0.0 {
            return hit;
        }

        let cx = if hit.x < bounds.x + r {
            bounds.x + r
        } else if hit.x > bounds.right() - r {
            bounds.right() - r
        } else {
            return hit;
        };
        let cy = if hit.y < bounds.y + r {
            bounds.y + r
        } else if hit.y > bounds.bottom() - r {
            bounds.bottom() - r
        } else {
            return hit;
        };

        let len = hit.distance_to(Point::new(cx, cy));
        if len == 0.0 {
            return hit;
        }
        Point::new(cx + (hit.x - cx) / len * r, cy + (hit.y - cy) / len * r)
    }
}

/// Arrow head attached to the destination end of a directed connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonDecoration {
    /// (length, half-width) of the arrow head
    pub scale: (f64, f64),
}

impl PolygonDecoration {
    /// Unit triangle pointing along +x with its tip at the origin
    const TRIANGLE_TIP: [(f64, f64); 3] = [(0.0, 0.0), (-1.0, 1.0), (-1.0, -1.0)];

    /// Arrow sized for a line of the given width
    pub fn arrow_for_width(line_width: i32) -> Self {
        if line_width < 1 {
            Self { scale: (7.0, 3.0) }
        } else {
            let factor = f64::from(line_width) / 2.0;
            Self {
                scale: (7.0 * factor, 3.0 * factor),
            }
        }
    }

    /// Polygon vertices with the tip at `tip`, pointing away from `from`
    pub fn points(&self, tip: Point, from: Point) -> Vec<Point> {
        let len = from.distance_to(tip);
        let (cos, sin) = if len == 0.0 {
            (1.0, 0.0)
        } else {
            ((tip.x - from.x) / len, (tip.y - from.y) / len)
        };

        Self::TRIANGLE_TIP
            .iter()
            .map(|(ux, uy)| {
                let sx = ux * self.scale.0;
                let sy = uy * self.scale.1;
                Point::new(tip.x + sx * cos - sy * sin, tip.y + sx * sin + sy * cos)
            })
            .collect()
    }
}

/// Visual variant chosen once, when the connection is created
#[derive(Debug, Clone, PartialEq)]
pub enum FigureKind {
    /// Straight or bent line between two different nodes
    Polyline { routing_constraint: Vec<Point> },
    /// Loop drawn from a node back onto itself
    Arc { depth: i32 },
}

/// Geometry of a figure resolved against current node bounds
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Polyline(Vec<Point>),
    Loop {
        start: Point,
        control_start: Point,
        control_end: Point,
        end: Point,
    },
}

impl Route {
    /// The last point of the route and the point it is approached from
    pub fn terminal_segment(&self) -> Option<(Point, Point)> {
        match self {
            Route::Polyline(points) if points.len() >= 2 => {
                Some((points[points.len() - 2], points[points.len() - 1]))
            }
            Route::Polyline(_) => None,
            Route::Loop {
                control_end, end, ..
            } => Some((*control_end, *end)),
        }
    }
}

/// The drawable kept in lockstep with a connection
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionFigure {
    kind: FigureKind,
    source_anchor: ChopboxAnchor,
    target_anchor: ChopboxAnchor,
    line_width: i32,
    line_style: LineStyle,
    foreground: Color,
    target_decoration: Option<PolygonDecoration>,
    revision: u64,
}

impl ConnectionFigure {
    /// Build the figure for a connection between `source` and `destination`.
    ///
    /// A connection from a node to itself gets an arc, anything else a polyline.
    pub fn build(source: NodeId, destination: NodeId, corner_radius: f64) -> Self {
        let kind = if source == destination {
            FigureKind::Arc { depth: 0 }
        } else {
            FigureKind::Polyline {
                routing_constraint: vec![],
            }
        };
        Self {
            kind,
            source_anchor: ChopboxAnchor::new(source, corner_radius),
            target_anchor: ChopboxAnchor::new(destination, corner_radius),
            line_width: 1,
            line_style: LineStyle::Solid,
            foreground: Color::BLACK,
            target_decoration: None,
            revision: 0,
        }
    }

    pub fn kind(&self) -> &FigureKind {
        &self.kind
    }

    pub fn is_loop(&self) -> bool {
        matches!(self.kind, FigureKind::Arc { .. })
    }

    /// Whether the figure can display a curve depth
    pub fn is_curve_capable(&self) -> bool {
        self.is_loop()
    }

    pub fn source_anchor(&self) -> &ChopboxAnchor {
        &self.source_anchor
    }

    pub fn target_anchor(&self) -> &ChopboxAnchor {
        &self.target_anchor
    }

    pub fn line_width(&self) -> i32 {
        self.line_width
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn target_decoration(&self) -> Option<&PolygonDecoration> {
        self.target_decoration.as_ref()
    }

    /// Curve depth, for curve-capable figures
    pub fn depth(&self) -> Option<i32> {
        match self.kind {
            FigureKind::Arc { depth } => Some(depth),
            FigureKind::Polyline { .. } => None,
        }
    }

    pub fn routing_constraint(&self) -> &[Point] {
        match &self.kind {
            FigureKind::Polyline { routing_constraint } => routing_constraint,
            FigureKind::Arc { .. } => &[],
        }
    }

    /// Number of synchronizations applied since the figure was built
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn set_line_width(&mut self, width: i32) {
        self.line_width = width;
    }

    pub(crate) fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
    }

    pub(crate) fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    pub(crate) fn set_depth(&mut self, new_depth: i32) {
        if let FigureKind::Arc { depth } = &mut self.kind {
            *depth = new_depth;
        }
    }

    pub(crate) fn set_target_decoration(&mut self, decoration: Option<PolygonDecoration>) {
        self.target_decoration = decoration;
    }

    /// Replace the bend points of a polyline; loops ignore them
    pub(crate) fn set_routing_constraint(&mut self, points: Vec<Point>) {
        if let FigureKind::Polyline { routing_constraint } = &mut self.kind {
            *routing_constraint = points;
        }
    }

    pub(crate) fn mark_synchronized(&mut self) {
        self.revision += 1;
    }

    /// Resolve the figure against the current bounds of its endpoints
    pub fn route(&self, source: &BoundingBox, target: &BoundingBox) -> Route {
        match &self.kind {
            FigureKind::Polyline { routing_constraint } => {
                let toward_source = routing_constraint
                    .first()
                    .copied()
                    .unwrap_or_else(|| target.center());
                let toward_target = routing_constraint
                    .last()
                    .copied()
                    .unwrap_or_else(|| source.center());

                let mut points = Vec::with_capacity(routing_constraint.len() + 2);
                points.push(self.source_anchor.location(source, toward_source));
                points.extend(routing_constraint.iter().copied());
                points.push(self.target_anchor.location(target, toward_target));
                Route::Polyline(points)
            }
            FigureKind::Arc { depth } => {
                let depth = f64::from(*depth);
                let quarter = source.width / 4.0;
                let center = source.center();
                let start = Point::new(center.x - quarter, source.y);
                let end = Point::new(center.x + quarter, source.y);
                Route::Loop {
                    start,
                    control_start: Point::new(start.x - depth, source.y - 2.0 * depth),
                    control_end: Point::new(end.x + depth, source.y - 2.0 * depth),
                    end,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn node_box() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 100.0, 50.0)
    }

    fn assert_point_near(actual: Point, expected: Point) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn test_anchor_horizontal_ray_hits_side() {
        let anchor = ChopboxAnchor::new(NodeId(0), 8.0);
        let p = anchor.location(&node_box(), Point::new(500.0, 25.0));
        assert_point_near(p, Point::new(100.0, 25.0));
    }

    #[test]
    fn test_anchor_vertical_ray_hits_top() {
        let anchor = ChopboxAnchor::new(NodeId(0), 8.0);
        let p = anchor.location(&node_box(), Point::new(50.0, -300.0));
        assert_point_near(p, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_anchor_reference_at_center() {
        let anchor = ChopboxAnchor::new(NodeId(0), 8.0);
        let p = anchor.location(&node_box(), Point::new(50.0, 25.0));
        assert_eq!(p, Point::new(50.0, 25.0));
    }

    #[test]
    fn test_anchor_corner_is_rounded() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let square = ChopboxAnchor::new(NodeId(0), 0.0);
        let rounded = ChopboxAnchor::new(NodeId(0), 8.0);
        let reference = Point::new(200.0, 200.0);

        assert_point_near(square.location(&bounds, reference), Point::new(100.0, 100.0));

        let p = rounded.location(&bounds, reference);
        let corner_center = Point::new(92.0, 92.0);
        assert_relative_eq!(p.distance_to(corner_center), 8.0, epsilon = 1e-9);
        assert!(p.x < 100.0 && p.y < 100.0);
    }

    #[test]
    fn test_arrow_scale() {
        assert_eq!(PolygonDecoration::arrow_for_width(0).scale, (7.0, 3.0));
        assert_eq!(PolygonDecoration::arrow_for_width(1).scale, (3.5, 1.5));
        assert_eq!(PolygonDecoration::arrow_for_width(4).scale, (14.0, 6.0));
    }

    #[test]
    fn test_arrow_points_follow_direction() {
        let arrow = PolygonDecoration { scale: (7.0, 3.0) };
        let pts = arrow.points(Point::new(10.0, 0.0), Point::new(0.0, 0.0));
        assert_eq!(pts[0], Point::new(10.0, 0.0));
        assert_relative_eq!(pts[1].x, 3.0);
        assert_relative_eq!(pts[1].y, 3.0);
        assert_relative_eq!(pts[2].x, 3.0);
        assert_relative_eq!(pts[2].y, -3.0);
    }

    #[test]
    fn test_build_chooses_variant() {
        let line = ConnectionFigure::build(NodeId(0), NodeId(1), 8.0);
        assert!(!line.is_loop());
        assert_eq!(line.depth(), None);

        let arc = ConnectionFigure::build(NodeId(2), NodeId(2), 8.0);
        assert!(arc.is_loop());
        assert!(arc.is_curve_capable());
        assert_eq!(arc.depth(), Some(0));
    }

    #[test]
    fn test_polyline_route_uses_bend_points() {
        let mut fig = ConnectionFigure::build(NodeId(0), NodeId(1), 0.0);
        let a = BoundingBox::new(0.0, 0.0, 20.0, 20.0);
        let b = BoundingBox::new(100.0, 0.0, 20.0, 20.0);

        match fig.route(&a, &b) {
            Route::Polyline(points) => {
                assert_eq!(points.len(), 2);
                assert_point_near(points[0], Point::new(20.0, 10.0));
                assert_point_near(points[1], Point::new(100.0, 10.0));
            }
            other => panic!("expected polyline, got {:?}", other),
        }

        fig.set_routing_constraint(vec![Point::new(10.0, 100.0), Point::new(110.0, 100.0)]);
        match fig.route(&a, &b) {
            Route::Polyline(points) => {
                assert_eq!(points.len(), 4);
                assert_point_near(points[0], Point::new(10.0, 20.0));
                assert_point_near(points[3], Point::new(110.0, 20.0));
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn test_loop_ignores_routing_constraint() {
        let mut fig = ConnectionFigure::build(NodeId(0), NodeId(0), 8.0);
        fig.set_routing_constraint(vec![Point::new(1.0, 1.0)]);
        assert!(fig.routing_constraint().is_empty());
    }
}
