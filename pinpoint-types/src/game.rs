use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::player::Player;
use crate::{GameId, PlayerId};

pub const DEFAULT_ROUNDS: u32 = 5;
pub const DEFAULT_TIME_PER_ROUND: u32 = 120; // seconds
pub const MAX_SCORE: u32 = 5000;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Reserved guess meaning "the clock ran out before the player answered".
    ///
    /// This overloads a real coordinate in the Gulf of Guinea, so a player who
    /// genuinely pins (0, 0) is scored as a timeout.
    pub const NO_GUESS: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn is_no_guess(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GameMode {
    Single,
    /// Simulated on one device; there is no transport between browsers.
    Multiplayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GameStatus {
    Lobby,     // Waiting for the host to start
    Playing,   // Round in progress, clock running
    RoundEnd,  // Every player has guessed, result on screen
    GameEnd,   // All rounds played, scores frozen
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Lobby => "lobby",
            GameStatus::Playing => "playing",
            GameStatus::RoundEnd => "round_end",
            GameStatus::GameEnd => "game_end",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGuess {
    pub player_id: PlayerId,
    /// Name at submission time, not a live reference to the player.
    pub player_name: String,
    pub guess: LatLng,
    pub distance: f64, // kilometers
    pub score: u32,
    pub timestamp: String, // ISO 8601 string
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: u32,
    pub target_location: LatLng,
    pub player_guesses: HashMap<PlayerId, PlayerGuess>,
    pub completed: bool,
}

impl Round {
    pub fn new(id: u32, target_location: LatLng) -> Self {
        Self {
            id,
            target_location,
            player_guesses: HashMap::new(),
            completed: false,
        }
    }

    pub fn has_guessed(&self, player_id: &PlayerId) -> bool {
        self.player_guesses.contains_key(player_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: GameId,
    pub mode: GameMode,
    pub status: GameStatus,
    /// 1-based; 0 only while in the lobby.
    pub current_round: u32,
    pub total_rounds: u32,
    pub rounds: Vec<Round>,
    pub players: Vec<Player>,
    pub time_per_round: u32,
    pub time_remaining: u32,
}

impl GameState {
    pub fn lobby(
        game_id: GameId,
        mode: GameMode,
        total_rounds: u32,
        time_per_round: u32,
        players: Vec<Player>,
    ) -> Self {
        Self {
            game_id,
            mode,
            status: GameStatus::Lobby,
            current_round: 0,
            total_rounds,
            rounds: Vec::new(),
            players,
            time_per_round,
            time_remaining: time_per_round,
        }
    }

    pub fn current_round(&self) -> Option<&Round> {
        let index = self.current_round.checked_sub(1)?;
        self.rounds.get(index as usize)
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == player_id)
    }

    /// Players ordered by total score, best first.
    pub fn leaderboard(&self) -> Vec<Player> {
        let mut players = self.players.clone();
        players.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        players
    }
}
