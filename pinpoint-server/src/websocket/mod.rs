use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::session::{SessionId, SessionManager};
use pinpoint_types::{ClientMessage, ServerMessage};

pub mod handlers;
pub mod rate_limiter;

use handlers::CommandHandler;
use rate_limiter::CommandLimiter;

/// Serves one socket attached to one session: pushes every session update
/// and applies incoming commands.
pub async fn handle_connection(
    websocket: WebSocket,
    session_id: SessionId,
    session_manager: Arc<SessionManager>,
    updates: broadcast::Receiver<ServerMessage>,
) {
    info!("WebSocket attached to session {}", session_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let (reply_sender, mut reply_receiver) = mpsc::unbounded_channel::<ServerMessage>();
    let handler = CommandHandler::new(session_id.clone(), session_manager);

    match handler.current_state().await {
        Ok(message) => {
            let _ = reply_sender.send(message);
        }
        Err(e) => {
            warn!("Session {} vanished before the socket opened: {}", session_id, e);
            return;
        }
    }

    // Handle incoming messages
    let incoming_handler = {
        let session_id = session_id.clone();
        let reply_sender = reply_sender.clone();
        let mut limiter = CommandLimiter::default();

        async move {
            while let Some(result) = ws_receiver.next().await {
                let msg = match result {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!("WebSocket error for session {}: {}", session_id, e);
                        break;
                    }
                };
                if msg.is_close() {
                    break;
                }
                if !limiter.try_acquire() {
                    warn!("Rate limit exceeded for session {}", session_id);
                    break;
                }

                if let Some(reply) = handle_message(msg, &handler).await {
                    if reply_sender.send(reply).is_err() {
                        break;
                    }
                }
            }
        }
    };

    // Handle outgoing messages
    let outgoing_handler = {
        let session_id = session_id.clone();
        let mut updates = updates;

        async move {
            loop {
                let message = tokio::select! {
                    reply = reply_receiver.recv() => match reply {
                        Some(message) => message,
                        None => break,
                    },
                    update = updates.recv() => match update {
                        Ok(message) => message,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("Session {} socket skipped {} updates", session_id, skipped);
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                };

                let json = match serde_json::to_string(&message) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize message: {:?}", e);
                        continue;
                    }
                };

                if let Err(e) = ws_sender.send(Message::text(json)).await {
                    warn!("Failed to send message to session {}: {:?}", session_id, e);
                    break;
                }
            }
        }
    };

    // Run both handlers concurrently
    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    // The session outlives its sockets; only DELETE or the idle sweep ends it.
    info!("WebSocket detached from session {}", session_id);
}

/// Parses and runs one frame, returning the reply to send back if any.
async fn handle_message(msg: Message, handler: &CommandHandler) -> Option<ServerMessage> {
    // Only handle text messages
    if !msg.is_text() {
        return None;
    }
    let text = msg.to_str().ok()?;

    let client_message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            return Some(ServerMessage::Error {
                message: format!("Invalid JSON message: {}", e),
            });
        }
    };

    match handler.handle_message(client_message).await {
        Ok(reply) => reply,
        Err(e) => Some(ServerMessage::Error {
            message: e.to_string(),
        }),
    }
}
