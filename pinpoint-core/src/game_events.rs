use pinpoint_types::{GameId, GameSummary, PlayerGuess, Round};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum GameEvent {
    GameStarted {
        game_id: GameId,
        total_rounds: u32,
    },
    RoundStarted {
        game_id: GameId,
        round_id: u32,
        time_limit: u32,
    },
    GuessSubmitted {
        game_id: GameId,
        round_id: u32,
        guess: PlayerGuess,
    },
    TimerExpired {
        game_id: GameId,
        round_id: u32,
    },
    RoundCompleted {
        game_id: GameId,
        round: Round,
    },
    GameCompleted {
        game_id: GameId,
        summary: GameSummary,
    },
    GameReset {
        previous_game_id: GameId,
        game_id: GameId,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameStarted { game_id, .. } => game_id.clone(),
            GameEvent::RoundStarted { game_id, .. } => game_id.clone(),
            GameEvent::GuessSubmitted { game_id, .. } => game_id.clone(),
            GameEvent::TimerExpired { game_id, .. } => game_id.clone(),
            GameEvent::RoundCompleted { game_id, .. } => game_id.clone(),
            GameEvent::GameCompleted { game_id, .. } => game_id.clone(),
            GameEvent::GameReset { game_id, .. } => game_id.clone(),
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Writes every event to the tracing log.
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: GameEvent) {
        match &event {
            GameEvent::GameStarted {
                game_id,
                total_rounds,
            } => info!("Game {} started with {} rounds", game_id, total_rounds),
            GameEvent::RoundStarted {
                game_id,
                round_id,
                time_limit,
            } => debug!("Game {} round {} started ({}s)", game_id, round_id, time_limit),
            GameEvent::GuessSubmitted {
                game_id,
                round_id,
                guess,
            } => info!(
                "Game {} round {}: {} guessed {} ({:.1} km, {} points)",
                game_id, round_id, guess.player_name, guess.guess, guess.distance, guess.score
            ),
            GameEvent::TimerExpired { game_id, round_id } => {
                info!("Game {} round {} ran out of time", game_id, round_id)
            }
            GameEvent::RoundCompleted { game_id, round } => {
                debug!("Game {} round {} completed", game_id, round.id)
            }
            GameEvent::GameCompleted { game_id, summary } => info!(
                "Game {} finished: {} of {} points",
                game_id, summary.total_score, summary.total_possible_score
            ),
            GameEvent::GameReset {
                previous_game_id,
                game_id,
            } => info!("Game {} reset as {}", previous_game_id, game_id),
        }
    }
}
