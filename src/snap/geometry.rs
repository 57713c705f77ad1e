//! Snap to the edges and centers of other shapes

use log::trace;

use super::{SnapError, SnapOrientation, SnapRequest, SnapStrategy};
use crate::geometry::BoundingBox;

/// Default distance, in diagram units, within which an edge is pulled
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Aligns a dragged rectangle with nearby reference rectangles
///
/// Columns are the left edges, centers and right edges of the references;
/// rows are their top edges, middles and bottom edges. The closest match
/// within the threshold wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapToGeometry {
    references: Vec<BoundingBox>,
    threshold: f64,
}

impl SnapToGeometry {
    pub fn new(references: Vec<BoundingBox>) -> Self {
        Self {
            references,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, SnapError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(SnapError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn references(&self) -> &[BoundingBox] {
        &self.references
    }

    fn columns(&self) -> Vec<f64> {
        self.references
            .iter()
            .flat_map(|r| [r.x, r.x + r.width / 2.0, r.right()])
            .collect()
    }

    fn rows(&self) -> Vec<f64> {
        self.references
            .iter()
            .flat_map(|r| [r.y, r.y + r.height / 2.0, r.bottom()])
            .collect()
    }

    /// Smallest correction that moves one of `edges` onto one of `lines`.
    /// Returns the correction and the line it lands on.
    fn closest(&self, edges: &[f64], lines: &[f64]) -> Option<(f64, f64)> {
        let mut best: Option<(f64, f64)> = None;
        for &edge in edges {
            for &line in lines {
                let correction = line - edge;
                if correction.abs() > self.threshold {
                    continue;
                }
                match best {
                    Some((current, _)) if current.abs() <= correction.abs() => {}
                    _ => best = Some((correction, line)),
                }
            }
        }
        best
    }
}

impl SnapStrategy for SnapToGeometry {
    fn snap_rectangle(
        &self,
        request: &mut SnapRequest,
        base: &BoundingBox,
        selection: &mut BoundingBox,
        can_resize: bool,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        if self.references.is_empty() {
            return orientation;
        }
        let columns = self.columns();
        let rows = self.rows();
        let mut remaining = orientation;

        if remaining.contains(SnapOrientation::HORIZONTAL) {
            let edges = [base.x, base.x + base.width / 2.0, base.right()];
            if let Some((dx, line)) = self.closest(&edges, &columns) {
                selection.x += dx;
                request.record_feedback(SnapOrientation::HORIZONTAL, line);
                remaining.remove(SnapOrientation::HORIZONTAL);
            }
        }
        if remaining.contains(SnapOrientation::VERTICAL) {
            let edges = [base.y, base.y + base.height / 2.0, base.bottom()];
            if let Some((dy, line)) = self.closest(&edges, &rows) {
                selection.y += dy;
                request.record_feedback(SnapOrientation::VERTICAL, line);
                remaining.remove(SnapOrientation::VERTICAL);
            }
        }

        if can_resize {
            if remaining.contains(SnapOrientation::EAST) {
                if let Some((dx, line)) = self.closest(&[base.right()], &columns) {
                    selection.width += dx;
                    request.record_feedback(SnapOrientation::EAST, line);
                    remaining.remove(SnapOrientation::EAST);
                }
            }
            if remaining.contains(SnapOrientation::WEST) {
                if let Some((dx, line)) = self.closest(&[base.x], &columns) {
                    selection.x += dx;
                    selection.width -= dx;
                    request.record_feedback(SnapOrientation::WEST, line);
                    remaining.remove(SnapOrientation::WEST);
                }
            }
            if remaining.contains(SnapOrientation::SOUTH) {
                if let Some((dy, line)) = self.closest(&[base.bottom()], &rows) {
                    selection.height += dy;
                    request.record_feedback(SnapOrientation::SOUTH, line);
                    remaining.remove(SnapOrientation::SOUTH);
                }
            }
            if remaining.contains(SnapOrientation::NORTH) {
                if let Some((dy, line)) = self.closest(&[base.y], &rows) {
                    selection.y += dy;
                    selection.height -= dy;
                    request.record_feedback(SnapOrientation::NORTH, line);
                    remaining.remove(SnapOrientation::NORTH);
                }
            }
        }

        trace!("geometry snap: {:?} -> {:?}", orientation, remaining);
        remaining
    }
}
