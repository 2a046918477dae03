use anyhow::{Result, anyhow};
use pinpoint_types::{
    DEFAULT_ROUNDS, DEFAULT_TIME_PER_ROUND, GameError, GameId, GameMode, GameState, GameStatus,
    GameSummary, LatLng, MAX_SCORE, Player, PlayerGuess, PlayerId, Round, RoundSummary, ScoreTier,
    accuracy_percent,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};
use tracing::warn;
use uuid::Uuid;

use crate::geodesy::{distance_km, format_distance};
use crate::{GameEvent, GameEventBus, GameEventHandler, ScoringEngine};

/// Upper bound on rounds per game; every round costs Street View lookups.
pub const MAX_ROUNDS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub total_rounds: u32,
    pub time_per_round: u32, // seconds
}

impl GameSettings {
    pub fn new(total_rounds: u32, time_per_round: u32) -> Result<Self> {
        if total_rounds == 0 {
            return Err(anyhow!("A game needs at least one round"));
        }
        if total_rounds > MAX_ROUNDS {
            return Err(anyhow!("A game has at most {} rounds", MAX_ROUNDS));
        }
        if time_per_round == 0 {
            return Err(anyhow!("Rounds need at least one second on the clock"));
        }
        Ok(Self {
            total_rounds,
            time_per_round,
        })
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_ROUNDS,
            time_per_round: DEFAULT_TIME_PER_ROUND,
        }
    }
}

/// What one second of the round clock did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Clock not running: not playing, or the local player already answered.
    Idle,
    Ticked { time_remaining: u32 },
    /// Time ran out; the sentinel guesses submitted on behalf of every player
    /// who had not answered.
    Expired { guesses: Vec<PlayerGuess> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    NextRound(u32),
    GameOver,
}

/// One game as seen from the local player's device.
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    local_player_id: PlayerId,
    has_guessed: bool,
    pub last_activity: SystemTime,
    event_bus: GameEventBus,
}

impl Game {
    pub fn new(game_id: GameId, mode: GameMode, player_name: &str, settings: GameSettings) -> Self {
        let name = match player_name.trim() {
            "" => "Player",
            trimmed => trimmed,
        };
        // The local player is always the first to enter, and so the host.
        let player = Player::new(name, true);
        let local_player_id = player.id;

        let state = GameState::lobby(
            game_id,
            mode,
            settings.total_rounds,
            settings.time_per_round,
            vec![player],
        );

        Self {
            state,
            local_player_id,
            has_guessed: false,
            last_activity: SystemTime::now(),
            event_bus: GameEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn game_id(&self) -> &str {
        &self.state.game_id
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn local_player_id(&self) -> PlayerId {
        self.local_player_id
    }

    pub fn local_player(&self) -> Option<&Player> {
        self.state.player(&self.local_player_id)
    }

    pub fn has_guessed(&self) -> bool {
        self.has_guessed
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.state.current_round()
    }

    pub fn leaderboard(&self) -> Vec<Player> {
        self.state.leaderboard()
    }

    /// Enters the first round. `targets` must already be resolved, one per
    /// round, so play never begins against a missing target.
    pub fn start(&mut self, targets: Vec<LatLng>) -> Result<(), GameError> {
        if self.state.status != GameStatus::Lobby {
            return Err(self.reject("start the game"));
        }
        if targets.len() != self.state.total_rounds as usize {
            return Err(GameError::TargetCountMismatch {
                expected: self.state.total_rounds,
                actual: targets.len() as u32,
            });
        }

        self.state.rounds = targets
            .into_iter()
            .enumerate()
            .map(|(i, target)| Round::new(i as u32 + 1, target))
            .collect();
        self.state.current_round = 1;
        self.state.time_remaining = self.state.time_per_round;
        self.state.status = GameStatus::Playing;
        self.has_guessed = false;
        self.touch();

        self.event_bus.publish(GameEvent::GameStarted {
            game_id: self.state.game_id.clone(),
            total_rounds: self.state.total_rounds,
        });
        self.publish_round_started();
        Ok(())
    }

    /// Records `player_id`'s guess for the current round and scores it with
    /// the time left on the clock.
    pub fn submit_guess(
        &mut self,
        player_id: PlayerId,
        location: LatLng,
    ) -> Result<PlayerGuess, GameError> {
        if self.state.status != GameStatus::Playing {
            return Err(self.reject("submit a guess"));
        }
        if !location.is_valid() {
            warn!(
                "Rejected out-of-range guess {} in game {}",
                location, self.state.game_id
            );
            return Err(GameError::InvalidLocation {
                lat: location.lat,
                lng: location.lng,
            });
        }
        let Some(player_name) = self.state.player(&player_id).map(|p| p.name.clone()) else {
            warn!(
                "Rejected guess from unknown player {} in game {}",
                player_id, self.state.game_id
            );
            return Err(GameError::PlayerNotFound {
                player_id: player_id.to_string(),
            });
        };
        let round_index = self.state.current_round as usize - 1;
        let round = self
            .state
            .rounds
            .get(round_index)
            .ok_or_else(|| self.reject("submit a guess"))?;
        if round.has_guessed(&player_id) {
            warn!(
                "Player {} tried to guess twice in round {} of game {}",
                player_id, round.id, self.state.game_id
            );
            return Err(GameError::AlreadyGuessed {
                player_id: player_id.to_string(),
            });
        }

        let distance = distance_km(location, round.target_location);
        let score = ScoringEngine::score_guess(
            location,
            distance,
            self.state.time_remaining,
            self.state.time_per_round,
        );
        let guess = PlayerGuess {
            player_id,
            player_name,
            guess: location,
            distance,
            score,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let round = &mut self.state.rounds[round_index];
        round.player_guesses.insert(player_id, guess.clone());
        let round_id = round.id;
        let everyone_guessed = self
            .state
            .players
            .iter()
            .all(|p| round.player_guesses.contains_key(&p.id));
        if everyone_guessed {
            round.completed = true;
        }

        if let Some(player) = self.state.players.iter_mut().find(|p| p.id == player_id) {
            player.total_score += score;
        }
        if player_id == self.local_player_id {
            self.has_guessed = true;
        }
        if everyone_guessed {
            self.state.status = GameStatus::RoundEnd;
        }
        self.touch();

        self.event_bus.publish(GameEvent::GuessSubmitted {
            game_id: self.state.game_id.clone(),
            round_id,
            guess: guess.clone(),
        });
        if everyone_guessed {
            self.event_bus.publish(GameEvent::RoundCompleted {
                game_id: self.state.game_id.clone(),
                round: self.state.rounds[round_index].clone(),
            });
        }

        Ok(guess)
    }

    /// Advances the round clock by one second. When it reaches zero every
    /// player who has not answered gets the no-guess sentinel, so the round
    /// always resolves.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status != GameStatus::Playing || self.has_guessed {
            return TickOutcome::Idle;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining > 0 {
            return TickOutcome::Ticked {
                time_remaining: self.state.time_remaining,
            };
        }

        self.event_bus.publish(GameEvent::TimerExpired {
            game_id: self.state.game_id.clone(),
            round_id: self.state.current_round,
        });

        let missing: Vec<PlayerId> = match self.current_round() {
            Some(round) => self
                .state
                .players
                .iter()
                .map(|p| p.id)
                .filter(|id| !round.has_guessed(id))
                .collect(),
            None => Vec::new(),
        };

        let guesses = missing
            .into_iter()
            .filter_map(|id| self.submit_guess(id, LatLng::NO_GUESS).ok())
            .collect();

        TickOutcome::Expired { guesses }
    }

    pub fn next_round(&mut self) -> Result<RoundAdvance, GameError> {
        if self.state.status != GameStatus::RoundEnd {
            return Err(self.reject("advance to the next round"));
        }

        self.touch();
        if self.state.current_round >= self.state.total_rounds {
            self.state.status = GameStatus::GameEnd;
            let summary = self.summary();
            self.event_bus.publish(GameEvent::GameCompleted {
                game_id: self.state.game_id.clone(),
                summary,
            });
            return Ok(RoundAdvance::GameOver);
        }

        self.state.current_round += 1;
        self.state.time_remaining = self.state.time_per_round;
        self.state.status = GameStatus::Playing;
        self.has_guessed = false;
        self.publish_round_started();
        Ok(RoundAdvance::NextRound(self.state.current_round))
    }

    /// Back to the lobby under a fresh game id. Players are kept, their
    /// scores are cleared.
    pub fn reset(&mut self) {
        let previous_game_id = std::mem::replace(&mut self.state.game_id, Uuid::new_v4().to_string());

        self.state.status = GameStatus::Lobby;
        self.state.current_round = 0;
        self.state.rounds.clear();
        self.state.time_remaining = self.state.time_per_round;
        for player in &mut self.state.players {
            player.total_score = 0;
        }
        self.has_guessed = false;
        self.touch();

        self.event_bus.publish(GameEvent::GameReset {
            previous_game_id,
            game_id: self.state.game_id.clone(),
        });
    }

    /// Results screen data for the local player.
    pub fn summary(&self) -> GameSummary {
        let player_id = self.local_player_id;
        let leaderboard = self.leaderboard();
        let total_score = self.local_player().map(|p| p.total_score).unwrap_or(0);
        let total_possible_score = self.state.total_rounds.saturating_mul(MAX_SCORE);

        let rounds = self
            .state
            .rounds
            .iter()
            .filter_map(|round| {
                let guess = round.player_guesses.get(&player_id)?;
                Some(RoundSummary {
                    round_id: round.id,
                    target_location: round.target_location,
                    guess: guess.guess,
                    distance: guess.distance,
                    formatted_distance: format_distance(guess.distance),
                    score: guess.score,
                    accuracy: accuracy_percent(guess.score),
                    tier: ScoreTier::for_score(guess.score),
                    timed_out: guess.guess.is_no_guess(),
                })
            })
            .collect();

        GameSummary {
            game_id: self.state.game_id.clone(),
            player_id,
            total_score,
            total_possible_score,
            percentage: f64::from(total_score) / f64::from(total_possible_score.max(1)) * 100.0,
            is_winner: leaderboard.first().map(|p| p.id) == Some(player_id),
            rounds,
            leaderboard,
        }
    }

    pub fn is_expired(&self, timeout_duration: Duration) -> bool {
        self.last_activity.elapsed().unwrap_or(Duration::ZERO) > timeout_duration
    }

    fn touch(&mut self) {
        self.last_activity = SystemTime::now();
    }

    fn publish_round_started(&mut self) {
        self.event_bus.publish(GameEvent::RoundStarted {
            game_id: self.state.game_id.clone(),
            round_id: self.state.current_round,
            time_limit: self.state.time_per_round,
        });
    }

    fn reject(&self, action: &str) -> GameError {
        warn!(
            "Rejected attempt to {} in game {} (status {})",
            action, self.state.game_id, self.state.status
        );
        GameError::invalid_state(action, self.state.status)
    }
}
