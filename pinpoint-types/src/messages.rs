use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameMode, GameState, GameSummary, LatLng, PlayerGuess, PlayerId};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all_fields = "camelCase")]
pub enum ClientMessage {
    StartGame,
    SubmitGuess { location: LatLng },
    NextRound,
    ResetGame,
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all_fields = "camelCase")]
pub enum ServerMessage {
    GameStateUpdate { snapshot: GameSnapshot },
    TimerTick { time_remaining: u32 },
    GuessRecorded { round_id: u32, guess: PlayerGuess },
    RoundResult { round_id: u32, target_location: LatLng, guesses: Vec<PlayerGuess> },
    GameOver { summary: GameSummary },
    Heartbeat,
    Error { message: String },
}

/// What the presentation layer renders: the full state plus the local
/// player's view of it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub state: GameState,
    pub player_id: PlayerId,
    pub has_guessed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub mode: GameMode,
    #[serde(default)]
    pub player_name: Option<String>,
    /// Pre-seeds the multiplayer join flow, as with a `?join=<gameId>` link.
    #[serde(default)]
    pub join: Option<String>,
}
