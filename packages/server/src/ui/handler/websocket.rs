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
use linkup_shared::time::{now_millis, timestamp_to_rfc3339};
use tokio::sync::mpsc;

use crate::{
    domain::{
        ClientEvent, ConnectionId, ConnectionIdFactory, EventPublisher, ServerEvent, Timestamp,
    },
    infrastructure::dto::websocket::parse_client_event,
    ui::state::AppState,
    usecase::{ReadReceiptUseCase, RoomMembershipUseCase, SendMessageUseCase},
};

/// Sent to the originating connection when a message could not be stored
const SEND_FAILED_MESSAGE: &str = "Failed to send message.";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();

    // Create a channel for this connection to receive events
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    state
        .registry
        .connect(connection_id, tx, Timestamp::new(now_millis()));
    tracing::info!("Connection '{}' established", connection_id);

    let (mut sender, mut receiver) = socket.split();
    let state_clone = state.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        "Received text from '{}': {}",
                        connection_id,
                        text.as_str()
                    );
                    dispatch(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued events to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let connected_at = state.registry.connected_at(connection_id);
    RoomMembershipUseCase::new(state.registry.clone()).disconnect(connection_id);
    if let Some(connected_at) = connected_at {
        tracing::info!(
            "Connection '{}' closed (connected since {})",
            connection_id,
            timestamp_to_rfc3339(connected_at.value())
        );
    }
}

/// Validate one inbound frame and route it to its use case
async fn dispatch(state: &AppState, connection_id: ConnectionId, text: &str) {
    let event = match parse_client_event(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Rejected frame from '{}': {}", connection_id, e);
            state
                .publisher
                .emit_to_connection(connection_id, &ServerEvent::error(e.to_string()));
            return;
        }
    };

    match event {
        ClientEvent::Join { user_id } => {
            RoomMembershipUseCase::new(state.registry.clone()).join(connection_id, user_id);
        }
        ClientEvent::Logout { user_id } => {
            RoomMembershipUseCase::new(state.registry.clone()).logout(connection_id, user_id);
        }
        ClientEvent::SendMessage(new_message) => {
            let usecase = SendMessageUseCase::new(state.messages.clone(), state.publisher.clone());
            if let Err(e) = usecase.execute(connection_id, new_message).await {
                tracing::error!("sendMessage from '{}' failed: {}", connection_id, e);
                state
                    .publisher
                    .emit_to_connection(connection_id, &ServerEvent::error(SEND_FAILED_MESSAGE));
            }
        }
        ClientEvent::ReadMessages {
            sender_id,
            reader_id,
        } => {
            ReadReceiptUseCase::new(state.publisher.clone()).execute(sender_id, reader_id);
        }
    }
}
