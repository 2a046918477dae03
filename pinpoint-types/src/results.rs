use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::game::{LatLng, MAX_SCORE};
use crate::player::Player;
use crate::{GameId, PlayerId};

/// Colour band for a score relative to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreTier {
    Excellent, // >= 80%
    Good,      // >= 50%
    Fair,      // >= 20%
    Poor,
}

impl ScoreTier {
    pub fn for_score(score: u32) -> Self {
        let percent = accuracy_percent(score);
        if percent >= 80.0 {
            ScoreTier::Excellent
        } else if percent >= 50.0 {
            ScoreTier::Good
        } else if percent >= 20.0 {
            ScoreTier::Fair
        } else {
            ScoreTier::Poor
        }
    }
}

/// Share of the per-round maximum, 0.0 to 100.0.
pub fn accuracy_percent(score: u32) -> f64 {
    f64::from(score) / f64::from(MAX_SCORE) * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub round_id: u32,
    pub target_location: LatLng,
    pub guess: LatLng,
    pub distance: f64,
    pub formatted_distance: String,
    pub score: u32,
    pub accuracy: f64,
    pub tier: ScoreTier,
    pub timed_out: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub total_score: u32,
    pub total_possible_score: u32,
    pub percentage: f64,
    pub is_winner: bool,
    pub rounds: Vec<RoundSummary>,
    pub leaderboard: Vec<Player>,
}
