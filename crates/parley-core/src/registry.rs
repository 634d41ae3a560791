//! Connection registry: per-connection outbound event queues.
//!
//! Each live connection registers an unbounded `mpsc` sender here; its
//! writer task drains the matching receiver onto the wire. Fan-out walks a
//! recipient list and pushes into each queue independently, so one slow or
//! just-disconnected recipient never blocks or fails delivery to the rest.

use dashmap::DashMap;
use parley_types::event::ServerEvent;
use parley_types::user::ConnectionId;
use tokio::sync::mpsc;
use tracing::debug;

/// Registry of outbound senders, one per live connection.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    senders: DashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return its outbound event receiver.
    ///
    /// If the connection was already registered, the old queue is replaced.
    pub fn register(&self, conn: ConnectionId) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.insert(conn, tx);
        debug!(%conn, "registered connection");
        rx
    }

    /// Drop a connection's outbound queue.
    ///
    /// Returns `true` if the connection was registered.
    pub fn unregister(&self, conn: ConnectionId) -> bool {
        let removed = self.senders.remove(&conn).is_some();
        if removed {
            debug!(%conn, "unregistered connection");
        }
        removed
    }

    /// Whether a connection currently has an outbound queue.
    pub fn is_registered(&self, conn: ConnectionId) -> bool {
        self.senders.contains_key(&conn)
    }

    /// Queue an event for one connection, best-effort.
    ///
    /// An unknown connection or a closed queue is silently skipped; the
    /// recipient is gone or going, and delivery here is not guaranteed.
    pub fn send_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&conn) {
            if sender.send(event).is_err() {
                debug!(%conn, "outbound queue closed, dropping event");
            }
        }
    }

    /// Queue an event for each of the given connections, best-effort.
    ///
    /// Recipients are independent: a failure for one never affects the
    /// others. Tolerates the recipient set shrinking mid-fan-out.
    pub fn send_to_many(&self, conns: &[ConnectionId], event: &ServerEvent) {
        for &conn in conns {
            self.send_to(conn, event.clone());
        }
    }

    /// Number of registered connections.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Whether no connection is registered.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope;

    #[tokio::test]
    async fn registered_connection_receives_events() {
        let registry = ConnectionRegistry::new();
        let conn = ConnectionId::new();
        let mut rx = registry.register(conn);

        registry.send_to(conn, envelope::admin_envelope("Welcome"));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ServerEvent::Message { .. }));
    }

    #[tokio::test]
    async fn send_to_unknown_connection_is_silent() {
        let registry = ConnectionRegistry::new();
        // Must not panic or error.
        registry.send_to(ConnectionId::new(), envelope::admin_envelope("Welcome"));
    }

    #[tokio::test]
    async fn send_to_many_skips_closed_recipients() {
        let registry = ConnectionRegistry::new();
        let alive = ConnectionId::new();
        let dead = ConnectionId::new();
        let mut alive_rx = registry.register(alive);
        let dead_rx = registry.register(dead);
        drop(dead_rx); // Receiver gone, sender still registered.

        let event = envelope::admin_envelope("hello");
        registry.send_to_many(&[dead, alive], &event);

        // The live recipient still gets its copy.
        assert!(alive_rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn unregister_drops_the_queue() {
        let registry = ConnectionRegistry::new();
        let conn = ConnectionId::new();
        let mut rx = registry.register(conn);

        assert!(registry.unregister(conn));
        assert!(!registry.is_registered(conn));
        assert!(!registry.unregister(conn));

        // Sender dropped, so the receiver terminates.
        assert!(rx.recv().await.is_none());
    }
}
