//! Contract between graph items and layout algorithms
//!
//! A layout algorithm never sees figures, colors or containers. It reads and
//! writes nodes through [`LayoutEntity`] and edges through
//! [`LayoutRelationship`], and may park its own state on either through the
//! opaque slots those traits expose.

pub mod attributes;

pub use attributes::AttributeBag;

use std::any::Any;

use crate::graph::NodeId;

/// Weight value meaning "no force between the endpoints"
pub const NO_TENSION: f64 = -1.0;

/// Normalize a layout weight into `[0, 1] ∪ {-1}`.
///
/// Negative weights collapse to [`NO_TENSION`], weights above one clamp to one.
/// NaN is treated as "no tension" as it compares false against both bounds.
pub fn clamp_weight(weight: f64) -> f64 {
    if weight < 0.0 || weight.is_nan() {
        NO_TENSION
    } else if weight > 1.0 {
        1.0
    } else {
        weight
    }
}

/// A bend point computed by a layout algorithm for an edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBendPoint {
    pub x: f64,
    pub y: f64,
    /// Control points shape a curve but are not passed through
    pub is_control_point: bool,
}

impl LayoutBendPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_control_point: false,
        }
    }

    pub fn control(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_control_point: true,
        }
    }
}

/// Per-edge constraints a layout algorithm may ask an edge to fill in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeConstraint {
    pub weight: f64,
    pub is_bidirectional: bool,
}

impl Default for EdgeConstraint {
    fn default() -> Self {
        Self {
            weight: 1.0,
            is_bidirectional: false,
        }
    }
}

/// What a layout algorithm needs from a node
pub trait LayoutEntity {
    fn x_in_layout(&self) -> f64;
    fn y_in_layout(&self) -> f64;
    fn width_in_layout(&self) -> f64;
    fn height_in_layout(&self) -> f64;

    /// Move the entity to a layout-computed location
    fn set_location_in_layout(&mut self, x: f64, y: f64);

    /// Resize the entity to a layout-computed size
    fn set_size_in_layout(&mut self, width: f64, height: f64);

    /// Scratch slot owned by the layout engine
    fn layout_information(&self) -> Option<&dyn Any>;

    fn set_layout_information(&mut self, information: Option<Box<dyn Any>>);
}

/// What a layout algorithm needs from an edge
///
/// Weight semantics: `-1` means no tension between the endpoints, `0` asks for
/// the maximum spring length and `1` for the minimum.
pub trait LayoutRelationship {
    fn source_in_layout(&self) -> NodeId;

    fn destination_in_layout(&self) -> NodeId;

    fn is_bidirectional_in_layout(&self) -> bool;

    fn weight_in_layout(&self) -> f64;

    /// Set the weight; out-of-range values are clamped, never rejected
    fn set_weight_in_layout(&mut self, weight: f64);

    fn attribute_in_layout(&self, key: &str) -> Option<&dyn Any>;

    fn set_attribute_in_layout(&mut self, key: String, value: Box<dyn Any>);

    /// Scratch slot owned by the layout engine
    fn layout_information(&self) -> Option<&dyn Any>;

    fn set_layout_information(&mut self, information: Option<Box<dyn Any>>);

    /// Accept layout-computed bend points. Implementors are free to ignore them.
    fn set_bend_points(&mut self, bend_points: &[LayoutBendPoint]);

    fn clear_bend_points(&mut self);

    fn populate_layout_constraint(&self, _constraint: &mut EdgeConstraint) {}
}
