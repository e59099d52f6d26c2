//! WebSocket handler
//!
//! Adapts an axum WebSocket to the connection lifecycle: one task drains the outbound
//! queue into the socket, one loop feeds inbound frames to the lifecycle in order.

use crate::protocol::{FrameKind, OutboundFrame};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<OutboundFrame>(state.config().gateway.message_buffer);

    // Queues the identity frame before either task starts
    let connection = state.lifecycle().on_open(tx).await;
    let session_id = connection.id();

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Spawn task to send frames to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let message = match frame {
                OutboundFrame::Text(text) => Message::Text(text.into()),
                OutboundFrame::Ping(body) => Message::Ping(body.into()),
            };

            if ws_sink.send(message).await.is_err() {
                tracing::warn!(session_id = %session_id, "Failed to send frame to WebSocket");
                break;
            }
        }

        // Close the WebSocket when channel is closed
        let _ = ws_sink.close().await;
    });

    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Spawn task to receive frames; each one is handled before the next is read
    let mut recv_task = tokio::spawn(async move {
        let lifecycle = state_recv.lifecycle();

        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    lifecycle
                        .on_message(&connection_recv, FrameKind::Text, text.as_bytes())
                        .await;
                }
                Ok(Message::Binary(data)) => {
                    lifecycle
                        .on_message(&connection_recv, FrameKind::Binary, &data)
                        .await;
                }
                Ok(Message::Ping(_)) => {
                    tracing::trace!(session_id = %session_id, "Ping received");
                    // Pong is handled automatically by axum
                }
                Ok(Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id, "Pong received");
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(session_id = %session_id, "Client closed connection");
                    return "peer closed";
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        error = %e,
                        "WebSocket error"
                    );
                    return "transport error";
                }
            }

            if connection_recv.is_closed() {
                return "closed during message";
            }
        }
        "stream ended"
    });

    // Wait for either task to complete, then stop the other
    let reason = tokio::select! {
        result = &mut recv_task => {
            send_task.abort();
            result.unwrap_or("receive task failed")
        }
        _ = &mut send_task => {
            recv_task.abort();
            "send task ended"
        }
    };

    state.lifecycle().on_close(&connection, Some(reason)).await;
}
