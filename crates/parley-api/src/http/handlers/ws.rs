//! WebSocket handler: one connection, one task, one lifecycle.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Once
//! connected, the handler:
//!
//! - **Forwards events:** Drains the connection's outbound queue from the
//!   connection registry and pushes every [`ServerEvent`] to the client
//!   as a JSON text frame.
//! - **Receives frames:** Parses incoming text frames as [`ClientFrame`]
//!   and dispatches them to the room protocol.
//!
//! Acknowledgments travel through the same outbound queue as broadcasts,
//! so a client always sees its welcome/snapshot events before the ack for
//! the join that caused them. Every JSON frame yields exactly one ack:
//! frames that parse as JSON but not as a valid call are acked with an
//! error (reusing any correlation id the value carries). Only text that
//! is not JSON at all, with no id to ack against, is logged and dropped.
//!
//! When the socket closes for any reason the handler runs the protocol's
//! disconnect path, which removes the directory entry and notifies the
//! remaining room members.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use parley_core::protocol::ConnectionState;
use parley_types::event::{ClientEvent, ClientFrame, ServerEvent};
use parley_types::user::ConnectionId;

use crate::state::AppState;

/// Upgrade an HTTP request to a chat WebSocket connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

/// Core per-connection loop.
///
/// Uses `tokio::select!` to multiplex between the connection's outbound
/// event queue and incoming WebSocket messages. The connection's
/// [`ConnectionState`] lives on this task's stack: the handler task is
/// the only place that drives this connection's lifecycle.
async fn handle_connection(socket: WebSocket, state: AppState) {
    let conn = ConnectionId::new();
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut outbound = state.protocol.registry().register(conn);
    let mut lifecycle = ConnectionState::Unjoined;

    tracing::debug!(%conn, "websocket connected");

    loop {
        tokio::select! {
            // --- Branch 1: Forward queued server events to the client ---
            event = outbound.recv() => {
                match event {
                    Some(event) => match serde_json::to_string(&event) {
                        Ok(json) => {
                            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                                // Client disconnected
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::warn!("failed to serialize server event: {err}");
                        }
                    },
                    // Queue dropped by the registry (disconnect raced us).
                    None => break,
                }
            }

            // --- Branch 2: Process frames from the client ---
            msg = ws_receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        process_frame(&text, conn, &mut lifecycle, &state);
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // Client disconnected
                        break;
                    }
                    Some(Err(err)) => {
                        tracing::debug!(%conn, "websocket receive error: {err}");
                        break;
                    }
                    // Ignore binary, ping, pong protocol frames (handled by axum)
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.protocol.disconnect(conn, &mut lifecycle);
    tracing::debug!(%conn, "websocket connection closed");
}

/// Parse one inbound frame, run it through the protocol, and queue the ack.
///
/// The ack is pushed onto the connection's own outbound queue so it is
/// ordered after any events the operation produced for this connection.
fn process_frame(
    text: &str,
    conn: ConnectionId,
    lifecycle: &mut ConnectionState,
    state: &AppState,
) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(err) => {
            // Valid JSON that isn't a valid frame still gets its one ack;
            // the correlation id is recoverable from the raw value. Only
            // unparseable text carries no id to ack against.
            match serde_json::from_str::<serde_json::Value>(text) {
                Ok(value) => {
                    let id = value.get("id").and_then(serde_json::Value::as_u64);
                    tracing::debug!(%conn, raw = %text, error = %err, "rejecting invalid frame");
                    state.protocol.registry().send_to(
                        conn,
                        ServerEvent::Ack {
                            id,
                            error: Some(format!("invalid request: {err}")),
                            message: None,
                        },
                    );
                }
                Err(_) => {
                    tracing::warn!(%conn, raw = %text, error = %err, "ignoring unparseable frame");
                }
            }
            return;
        }
    };

    let protocol = &state.protocol;
    let result = match &frame.event {
        ClientEvent::Join { username, room } => {
            protocol.join(conn, lifecycle, username, room).map(|()| None)
        }
        ClientEvent::SendMessage { text } => protocol
            .send_message(conn, lifecycle, text)
            .map(|()| Some("Delivered".to_string())),
        ClientEvent::SendLocation {
            latitude,
            longitude,
        } => protocol
            .send_location(conn, lifecycle, *latitude, *longitude)
            .map(|()| None),
    };

    let ack = match result {
        Ok(message) => ServerEvent::Ack {
            id: frame.id,
            error: None,
            message,
        },
        Err(err) => ServerEvent::Ack {
            id: frame.id,
            error: Some(err.to_string()),
            message: None,
        },
    };
    protocol.registry().send_to(conn, ack);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
