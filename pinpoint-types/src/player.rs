use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Sum of every round score so far. Only ever grows until a reset.
    pub total_score: u32,
    pub is_host: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, is_host: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            total_score: 0,
            is_host,
        }
    }
}
