use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::game::GameStatus;

/// Rejected state machine transitions. None of these mutate the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
#[serde(rename_all_fields = "camelCase")]
pub enum GameError {
    #[error("cannot {action} while the game is {current_state}")]
    InvalidGameState {
        action: String,
        current_state: GameStatus,
    },
    #[error("player {player_id} has already guessed this round")]
    AlreadyGuessed { player_id: String },
    #[error("player {player_id} is not in this game")]
    PlayerNotFound { player_id: String },
    #[error("location {lat}, {lng} is outside the valid coordinate range")]
    InvalidLocation { lat: f64, lng: f64 },
    #[error("expected {expected} round targets, got {actual}")]
    TargetCountMismatch { expected: u32, actual: u32 },
    #[error("session {session_id} not found")]
    SessionNotFound { session_id: String },
    #[error("a game start is already in progress")]
    StartInProgress,
    #[error("game start was cancelled")]
    StartCancelled,
}

impl GameError {
    pub fn invalid_state(action: &str, current_state: GameStatus) -> Self {
        GameError::InvalidGameState {
            action: action.to_string(),
            current_state,
        }
    }
}
