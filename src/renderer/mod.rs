//! SVG preview renderer for graphs
//!
//! This module walks a [`Graph`](crate::graph::Graph), resolves every
//! connection figure against the current node bounds and produces an SVG
//! string with CSS classes for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_stylesheet};
