use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::session::{SessionId, SessionManager};
use pinpoint_types::{ClientMessage, ServerMessage};

/// Applies socket commands to one session.
#[derive(Clone)]
pub struct CommandHandler {
    session_id: SessionId,
    session_manager: Arc<SessionManager>,
}

impl CommandHandler {
    pub fn new(session_id: SessionId, session_manager: Arc<SessionManager>) -> Self {
        Self {
            session_id,
            session_manager,
        }
    }

    /// Runs one command. State changes reach the socket through the session's
    /// update channel, so only direct replies are returned here.
    pub async fn handle_message(
        &self,
        message: ClientMessage,
    ) -> Result<Option<ServerMessage>, ApiError> {
        match message {
            ClientMessage::StartGame => {
                // The game enters round one once the lookup task finishes.
                let _pending = self.session_manager.start_game(&self.session_id).await?;
                info!("Start requested over socket for session {}", self.session_id);
                Ok(None)
            }
            ClientMessage::SubmitGuess { location } => {
                self.session_manager
                    .submit_guess(&self.session_id, location)
                    .await?;
                Ok(None)
            }
            ClientMessage::NextRound => {
                self.session_manager.next_round(&self.session_id).await?;
                Ok(None)
            }
            ClientMessage::ResetGame => {
                self.session_manager.reset_game(&self.session_id).await?;
                Ok(None)
            }
            ClientMessage::Heartbeat => {
                debug!("Heartbeat from session {}", self.session_id);
                Ok(Some(ServerMessage::Heartbeat))
            }
        }
    }

    /// Initial state pushed to a socket right after it connects.
    pub async fn current_state(&self) -> Result<ServerMessage, ApiError> {
        let snapshot = self.session_manager.snapshot(&self.session_id).await?;
        Ok(ServerMessage::GameStateUpdate { snapshot })
    }
}
