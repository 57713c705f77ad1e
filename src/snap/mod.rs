//! Snapping while dragging and resizing
//!
//! A [`SnapStrategy`] looks at a proposed location (or rectangle) and may pull
//! it onto some reference such as a grid or the edges of other shapes. The
//! [`SnapOrientation`] mask threaded through each call says which axes are
//! still free to snap; a strategy that snaps an axis clears its bit so that
//! strategies consulted later leave it alone.

pub mod compound;
pub mod error;
pub mod geometry;
pub mod grid;

pub use compound::CompoundSnapStrategy;
pub use error::SnapError;
pub use geometry::SnapToGeometry;
pub use grid::SnapToGrid;

use bitflags::bitflags;

use crate::geometry::{BoundingBox, Point};

bitflags! {
    /// Axes still eligible for snapping
    ///
    /// `HORIZONTAL` and `VERTICAL` cover translation. The compass bits cover
    /// the individual edges of a rectangle being resized.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SnapOrientation: u32 {
        const NORTH = 1;
        const SOUTH = 1 << 2;
        const WEST = 1 << 3;
        const EAST = 1 << 4;
        const HORIZONTAL = 1 << 6;
        const VERTICAL = 1 << 7;
    }
}

impl SnapOrientation {
    /// No axis left to snap
    pub const NONE: SnapOrientation = SnapOrientation::empty();

    /// Both translation axes
    pub const TRANSLATION: SnapOrientation =
        SnapOrientation::HORIZONTAL.union(SnapOrientation::VERTICAL);

    pub fn is_none(&self) -> bool {
        self.is_empty()
    }
}

/// What kind of interaction is asking for a snap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestKind {
    #[default]
    Move,
    Resize,
    Create,
    Add,
    Clone,
}

/// Where a strategy snapped an axis to, for drawing guide feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapFeedback {
    /// The axis or edge that was snapped
    pub orientation: SnapOrientation,
    /// Coordinate of the reference line (x for vertical lines, y for horizontal)
    pub position: f64,
}

/// Context of one drag or resize step
#[derive(Debug, Clone, Default)]
pub struct SnapRequest {
    pub kind: RequestKind,
    feedback: Vec<SnapFeedback>,
}

impl SnapRequest {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            feedback: vec![],
        }
    }

    pub fn is_resize(&self) -> bool {
        self.kind == RequestKind::Resize
    }

    /// Record a reference line a strategy snapped to
    pub fn record_feedback(&mut self, orientation: SnapOrientation, position: f64) {
        self.feedback.push(SnapFeedback {
            orientation,
            position,
        });
    }

    pub fn feedback(&self) -> &[SnapFeedback] {
        &self.feedback
    }

    pub fn clear_feedback(&mut self) {
        self.feedback.clear();
    }
}

/// One snapping rule
///
/// Implementations receive the mask of axes still free and return the mask of
/// axes still free after they acted. The returned mask must be a subset of the
/// one passed in.
pub trait SnapStrategy {
    /// Snap a rectangle being moved or resized.
    ///
    /// Corrections are computed against `base` and applied to `selection`.
    /// `can_resize` tells whether edges may move independently; strategies
    /// that only translate ignore the compass bits when it is false.
    fn snap_rectangle(
        &self,
        request: &mut SnapRequest,
        base: &BoundingBox,
        selection: &mut BoundingBox,
        can_resize: bool,
        orientation: SnapOrientation,
    ) -> SnapOrientation;

    /// Snap a single location.
    ///
    /// The default treats the point as a zero-sized rectangle being moved.
    fn snap_point(
        &self,
        request: &mut SnapRequest,
        location: &mut Point,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        let base = BoundingBox::at(*location);
        let mut selection = base;
        let remaining = self.snap_rectangle(request, &base, &mut selection, false, orientation);
        *location = selection.location();
        remaining
    }
}

impl<S: SnapStrategy + ?Sized> SnapStrategy for Box<S> {
    fn snap_rectangle(
        &self,
        request: &mut SnapRequest,
        base: &BoundingBox,
        selection: &mut BoundingBox,
        can_resize: bool,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        (**self).snap_rectangle(request, base, selection, can_resize, orientation)
    }

    fn snap_point(
        &self,
        request: &mut SnapRequest,
        location: &mut Point,
        orientation: SnapOrientation,
    ) -> SnapOrientation {
        (**self).snap_point(request, location, orientation)
    }
}
