//! Realtime subscription endpoint. Each connected socket gets a catch-up
//! snapshot on upgrade and then every broadcast issued while it is open.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::services::notifier::{EventKind, StatusEvent};
use crate::state::AppState;

pub async fn websocket_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the snapshot read so no broadcast between the two is
    // missed; the subscriber may see the same state twice, never a gap.
    let mut events = state.occupancy.notifier().subscribe();

    let snapshot = match state.occupancy.status().await {
        Ok(status) => StatusEvent {
            kind: EventKind::Status,
            status,
        },
        Err(err) => {
            tracing::warn!(error = ?err, "Failed to build catch-up snapshot, dropping socket");
            return;
        }
    };
    if send_event(&mut sender, &snapshot).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if send_event(&mut sender, &event).await.is_err() {
                        break;
                    }
                }
                // Slow subscriber: skip to the newest events, a viewer only
                // cares about the latest state.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Viewers have nothing to say; ignore any other frame.
                Some(Ok(_)) => {}
            },
        }
    }
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &StatusEvent,
) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(payload) => sender.send(Message::Text(payload.into())).await,
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize status event");
            Ok(())
        }
    }
}
