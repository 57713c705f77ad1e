//! Error types for snap strategy configuration

use thiserror::Error;

/// Errors raised while building snap strategies
///
/// These are configuration errors: a strategy that fails to build must not be
/// used in a drag.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapError {
    /// A compound strategy needs at least one delegate
    #[error("snap chain needs at least one strategy")]
    EmptyChain,

    /// Grid spacing must be positive and finite on both axes
    #[error("invalid grid spacing {x} x {y}")]
    InvalidGridSpacing { x: f64, y: f64 },

    /// Geometry snapping threshold must be non-negative and finite
    #[error("invalid snap threshold {0}")]
    InvalidThreshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_display() {
        assert!(SnapError::EmptyChain.to_string().contains("at least one"));
    }

    #[test]
    fn test_grid_spacing_display() {
        let err = SnapError::InvalidGridSpacing { x: 0.0, y: 10.0 };
        assert_eq!(err.to_string(), "invalid grid spacing 0 x 10");
    }
}
