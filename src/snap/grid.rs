//! Snap to a regular grid

use log::trace;

use super::{SnapError, SnapOrientation, SnapRequest, SnapStrategy};
use crate::geometry::{BoundingBox, Point};

/// Pulls locations and edges onto the nearest grid line
#[derive(Debug, Clone, PartialEq)]
pub struct SnapToGrid {
    spacing_x: f64,
    spacing_y: f64,
    origin: Point,
}

impl SnapToGrid {
    pub fn new(spacing_x: f64, spacing_y: f64) -> Result<Self, SnapError> {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        if !valid(spacing_x) || !valid(spacing_y) {
            return Err(SnapError::InvalidGridSpacing {
                x: spacing_x,
                y: spacing_y,
            });
        }
        Ok(Self {
            spacing_x,
            spacing_y,
            origin: Point::new(0.0, 0.0),
        })
    }

    /// Same spacing on both axes
    pub fn square(spacing: f64) -> Result<Self, SnapError> {
        Self::new(spacing, spacing)
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn spacing(&self) -> (f64, f64) {
        (self.spacing_x, self.spacing_y)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    fn nearest_x(&self, x: f64) -> f64 {
        nearest_line(x, self.origin.x, self.spacing_x)
    }

    fn nearest_y(&self, y: f64) -> f64 {
        nearest_line(y, self.origin.y, self.spacing_y)
    }
}

fn nearest_line(value: f64, origin: f64, spacing: f64) -> f64 {
    origin + ((value - origin) / spacing).round() * spacing
}

impl SnapStrategy for SnapToGrid {
    fn snap_rectangle(
        &self,
        _request: &mut SnapRequest,
        base: &BoundingBox,
        selection: &mut BoundingBox,
        can_resize: bool,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        let mut remaining = orientation;

        if remaining.contains(SnapOrientation::HORIZONTAL) {
            let dx = self.nearest_x(base.x) - base.x;
            selection.x += dx;
            remaining.remove(SnapOrientation::HORIZONTAL);
        }
        if remaining.contains(SnapOrientation::VERTICAL) {
            let dy = self.nearest_y(base.y) - base.y;
            selection.y += dy;
            remaining.remove(SnapOrientation::VERTICAL);
        }

        if can_resize {
            if remaining.contains(SnapOrientation::EAST) {
                selection.width += self.nearest_x(base.right()) - base.right();
                remaining.remove(SnapOrientation::EAST);
            }
            if remaining.contains(SnapOrientation::SOUTH) {
                selection.height += self.nearest_y(base.bottom()) - base.bottom();
                remaining.remove(SnapOrientation::SOUTH);
            }
            if remaining.contains(SnapOrientation::WEST) {
                let dx = self.nearest_x(base.x) - base.x;
                selection.x += dx;
                selection.width -= dx;
                remaining.remove(SnapOrientation::WEST);
            }
            if remaining.contains(SnapOrientation::NORTH) {
                let dy = self.nearest_y(base.y) - base.y;
                selection.y += dy;
                selection.height -= dy;
                remaining.remove(SnapOrientation::NORTH);
            }
        }

        trace!("grid snap: {:?} -> {:?}", orientation, remaining);
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::RequestKind;

    #[test]
    fn test_invalid_spacing_rejected() {
        assert!(SnapToGrid::new(0.0, 10.0).is_err());
        assert!(SnapToGrid::new(10.0, -1.0).is_err());
        assert!(SnapToGrid::new(f64::NAN, 10.0).is_err());
        assert!(SnapToGrid::square(f64::INFINITY).is_err());
    }

    #[test]
    fn test_snap_point_to_nearest_line() {
        let grid = SnapToGrid::square(10.0).unwrap();
        let mut request = SnapRequest::default();
        let mut location = Point::new(14.0, 26.0);

        let remaining = grid.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        assert_eq!(location, Point::new(10.0, 30.0));
        assert_eq!(remaining, SnapOrientation::NONE);
    }

    #[test]
    fn test_only_open_axes_snap() {
        let grid = SnapToGrid::square(10.0).unwrap();
        let mut request = SnapRequest::default();
        let mut location = Point::new(14.0, 26.0);

        let remaining = grid.snap_point(&mut request, &mut location, SnapOrientation::VERTICAL);

        assert_eq!(location, Point::new(14.0, 30.0));
        assert_eq!(remaining, SnapOrientation::NONE);
    }

    #[test]
    fn test_origin_offsets_lines() {
        let grid = SnapToGrid::square(10.0)
            .unwrap()
            .with_origin(Point::new(5.0, 5.0));
        let mut request = SnapRequest::default();
        let mut location = Point::new(13.0, 1.0);

        grid.snap_point(&mut request, &mut location, SnapOrientation::TRANSLATION);

        assert_eq!(location, Point::new(15.0, 5.0));
    }

    #[test]
    fn test_resize_snaps_far_edges() {
        let grid = SnapToGrid::new(10.0, 10.0).unwrap();
        let mut request = SnapRequest::new(RequestKind::Resize);
        let base = BoundingBox::new(0.0, 0.0, 27.0, 13.0);
        let mut selection = base;

        let remaining = grid.snap_rectangle(
            &mut request,
            &base,
            &mut selection,
            true,
            SnapOrientation::EAST | SnapOrientation::SOUTH,
        );

        assert_eq!(remaining, SnapOrientation::NONE);
        assert_eq!(selection, BoundingBox::new(0.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn test_edges_untouched_without_resize() {
        let grid = SnapToGrid::square(10.0).unwrap();
        let mut request = SnapRequest::default();
        let base = BoundingBox::new(0.0, 0.0, 27.0, 13.0);
        let mut selection = base;

        let remaining = grid.snap_rectangle(
            &mut request,
            &base,
            &mut selection,
            false,
            SnapOrientation::EAST,
        );

        assert_eq!(remaining, SnapOrientation::EAST);
        assert_eq!(selection, base);
    }
}
