//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionIdFactory, pusher_channel},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Everything this connection is sent (init snapshot and broadcasts) goes through `rx`,
/// so the event loop never waits on the socket. The channel is bounded; while it is
/// full the hub skips this connection instead of buffering.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (sender, mut receiver) = socket.split();

    // Bounded channel for everything pushed to this client
    let (tx, rx) = pusher_channel();

    // Registration goes through the event loop ahead of any frame read below,
    // so the init snapshot is always the first message on this connection
    if let Err(e) = state.event_loop.connected(connection_id.clone(), tx) {
        tracing::error!("Cannot register connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' opened", connection_id);

    let events = state.event_loop.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received text from '{}': {}",
                        connection_id_clone,
                        text.as_str()
                    );
                    if events
                        .received(connection_id_clone.clone(), text.as_str().to_owned())
                        .is_err()
                    {
                        break;
                    }
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} bytes of binary data from '{}'",
                        data.len(),
                        connection_id_clone
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to send queued messages to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = state.event_loop.disconnected(connection_id.clone()) {
        tracing::warn!("Cannot unregister connection '{}': {}", connection_id, e);
    }
}
