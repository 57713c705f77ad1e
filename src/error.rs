//! Error types for the graph model

use thiserror::Error;

use crate::graph::{ConnectionId, NodeId};

/// Errors raised by graph container and connection operations
///
/// None of these are recoverable in the sense of retrying: they signal a
/// handle that does not (or no longer) point at a live entity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The node handle was never issued by this graph
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The node was removed from the graph
    #[error("node {0} has been disposed")]
    NodeDisposed(NodeId),

    /// The connection handle was never issued by this graph
    #[error("unknown connection {0}")]
    UnknownConnection(ConnectionId),

    /// The connection was disposed; further use is rejected
    #[error("connection {0} has been disposed")]
    ConnectionDisposed(ConnectionId),
}

impl GraphError {
    /// Create a disposed-connection error
    pub fn disposed(id: ConnectionId) -> Self {
        Self::ConnectionDisposed(id)
    }

    /// Whether this error reports use of a disposed entity
    pub fn is_disposed(&self) -> bool {
        matches!(
            self,
            Self::ConnectionDisposed(_) | Self::NodeDisposed(_)
        )
    }

    /// The connection handle involved, if any
    pub fn connection(&self) -> Option<ConnectionId> {
        match self {
            Self::UnknownConnection(id) | Self::ConnectionDisposed(id) => Some(*id),
            _ => None,
        }
    }

    /// The node handle involved, if any
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::UnknownNode(id) | Self::NodeDisposed(id) => Some(*id),
            _ => None,
        }
    }
}
