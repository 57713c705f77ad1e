//! Mutable access to a connection together with its container

use std::ops::{Deref, DerefMut};

use log::debug;

use super::{Connection, ConnectionId, Graph, GraphItem};

/// A live connection borrowed mutably from its graph
///
/// Style setters are reached through `DerefMut`. Operations that also update
/// container state (highlighting, visibility, disposal) live here. The handle
/// can only be obtained for a live connection, and `dispose` consumes it.
pub struct ConnectionMut<'g> {
    graph: &'g mut Graph,
    id: ConnectionId,
}

impl<'g> ConnectionMut<'g> {
    pub(crate) fn new(graph: &'g mut Graph, id: ConnectionId) -> Self {
        Self { graph, id }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Highlight the connection. No-op if it already is.
    pub fn highlight(&mut self) {
        if self.is_highlighted() {
            return;
        }
        self.connection_mut().set_highlighted_flag(true);
        let recorded = self.graph.highlight_edge(self.id);
        debug_assert!(recorded, "{} was already in the highlighted set", self.id);
    }

    /// Remove the highlight. No-op if the connection is not highlighted.
    pub fn unhighlight(&mut self) {
        if !self.is_highlighted() {
            return;
        }
        self.connection_mut().set_highlighted_flag(false);
        let recorded = self.graph.unhighlight_edge(self.id);
        debug_assert!(recorded, "{} was missing from the highlighted set", self.id);
    }

    /// Show or hide the connection; the container's visible set is updated first
    pub fn set_visible(&mut self, visible: bool) {
        self.graph
            .set_item_visible(GraphItem::Connection(self.id), visible);
        self.connection_mut().set_visible_flag(visible);
    }

    /// Deregister from both endpoints and the container
    pub fn dispose(self) {
        let id = self.id;
        if let Err(e) = self.graph.dispose_connection(id) {
            debug!("dispose of {} skipped: {}", id, e);
        }
    }

    fn connection_mut(&mut self) -> &mut Connection {
        &mut self.graph.connections[&self.id]
    }
}

impl Deref for ConnectionMut<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.graph.connections[&self.id]
    }
}

impl DerefMut for ConnectionMut<'_> {
    fn deref_mut(&mut self) -> &mut Connection {
        self.connection_mut()
    }
}
