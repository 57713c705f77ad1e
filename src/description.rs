//! Textual edge and move descriptions accepted by the preview pipeline
//!
//! An edge is written `a->b` (directed) or `a--b` (undirected). A move is
//! written `name=x,y` and drags a node to that location.

use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Point;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("invalid edge '{0}': expected 'a->b' or 'a--b'")]
    InvalidEdge(String),

    #[error("invalid move '{0}': expected 'name=x,y'")]
    InvalidMove(String),
}

/// One connection to create between two named nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub directed: bool,
}

impl FromStr for EdgeSpec {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (parts, directed) = if let Some(parts) = s.split_once("->") {
            (parts, true)
        } else if let Some(parts) = s.split_once("--") {
            (parts, false)
        } else {
            return Err(DescriptionError::InvalidEdge(s.to_string()));
        };

        let source = parts.0.trim();
        let target = parts.1.trim();
        if source.is_empty() || target.is_empty() {
            return Err(DescriptionError::InvalidEdge(s.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            target: target.to_string(),
            directed,
        })
    }
}

/// A drag of one node to a new location
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMove {
    pub node: String,
    pub to: Point,
}

impl FromStr for NodeMove {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DescriptionError::InvalidMove(s.to_string());

        let (node, coords) = s.split_once('=').ok_or_else(invalid)?;
        let (x, y) = coords.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;

        let node = node.trim();
        if node.is_empty() || !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }

        Ok(Self {
            node: node.to_string(),
            to: Point::new(x, y),
        })
    }
}
