use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use pinpoint_core::{
    CandidatePool, Game, GameEvent, GameEventHandler, GameSettings, LocationProvider,
    RoundAdvance, TickOutcome, TracingEventHandler, resolve_round_targets,
};
use pinpoint_types::{
    CreateGameRequest, GameError, GameMode, GameSnapshot, GameStatus, GameSummary, LatLng,
    PlayerGuess, ServerMessage,
};
use rand::Rng;
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

pub type SessionId = String;

const UPDATE_CHANNEL_CAPACITY: usize = 64;
const JOIN_CODE_LENGTH: usize = 6;
const JOIN_CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_JOIN_CODE_LENGTH: usize = 64;
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Short shareable id for a multiplayer game.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..JOIN_CODE_LENGTH)
        .map(|_| JOIN_CODE_ALPHABET[rng.random_range(0..JOIN_CODE_ALPHABET.len())] as char)
        .collect()
}

fn validate_join_code(code: &str) -> Result<String, ApiError> {
    let code = code.trim();
    let well_formed = !code.is_empty()
        && code.len() <= MAX_JOIN_CODE_LENGTH
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !well_formed {
        return Err(ApiError::BadRequest(format!("invalid join code {:?}", code)));
    }
    Ok(code.to_string())
}

/// Turns core game events into the messages pushed to watchers.
struct BroadcastForwarder {
    updates: broadcast::Sender<ServerMessage>,
}

impl GameEventHandler for BroadcastForwarder {
    fn handle_event(&mut self, event: GameEvent) {
        let message = match event {
            GameEvent::GuessSubmitted {
                round_id, guess, ..
            } => ServerMessage::GuessRecorded { round_id, guess },
            GameEvent::RoundCompleted { round, .. } => {
                let mut guesses: Vec<PlayerGuess> = round.player_guesses.into_values().collect();
                guesses.sort_by(|a, b| b.score.cmp(&a.score));
                ServerMessage::RoundResult {
                    round_id: round.id,
                    target_location: round.target_location,
                    guesses,
                }
            }
            GameEvent::GameCompleted { summary, .. } => ServerMessage::GameOver { summary },
            _ => return,
        };
        // Sending only fails when nobody is subscribed.
        let _ = self.updates.send(message);
    }
}

/// One player's game plus the background work attached to it.
pub struct Session {
    id: SessionId,
    game: Game,
    this: Weak<Mutex<Session>>,
    /// Bumped on reset so a start resolved for the old game is discarded.
    epoch: u64,
    timer: Option<AbortHandle>,
    timer_generation: u64,
    pending_start: Option<AbortHandle>,
    updates: broadcast::Sender<ServerMessage>,
}

impl Session {
    fn new(id: SessionId, mut game: Game) -> Arc<Mutex<Self>> {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        game.add_event_handler(Box::new(TracingEventHandler));
        game.add_event_handler(Box::new(BroadcastForwarder {
            updates: updates.clone(),
        }));

        Arc::new_cyclic(|this| {
            Mutex::new(Self {
                id,
                game,
                this: this.clone(),
                epoch: 0,
                timer: None,
                timer_generation: 0,
                pending_start: None,
                updates,
            })
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.game.state.clone(),
            player_id: self.game.local_player_id(),
            has_guessed: self.game.has_guessed(),
        }
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_start_pending(&self) -> bool {
        self.pending_start.is_some()
    }

    fn send(&self, message: ServerMessage) {
        let _ = self.updates.send(message);
    }

    fn broadcast_state(&self) {
        self.send(ServerMessage::GameStateUpdate {
            snapshot: self.snapshot(),
        });
    }

    /// Starts the one-second round clock, replacing any clock already running.
    fn arm_timer(&mut self) {
        self.disarm_timer();
        let generation = self.timer_generation;
        let weak = self.this.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                ticks.tick().await;
                let Some(session) = weak.upgrade() else {
                    break;
                };
                let mut guard = session.lock().await;
                if guard.timer_generation != generation {
                    break;
                }
                if !guard.on_tick() {
                    break;
                }
            }
        });

        self.timer = Some(handle.abort_handle());
    }

    fn disarm_timer(&mut self) {
        self.timer_generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Returns false once the clock has nothing left to do.
    fn on_tick(&mut self) -> bool {
        match self.game.tick() {
            TickOutcome::Idle => {
                self.timer = None;
                false
            }
            TickOutcome::Ticked { time_remaining } => {
                self.send(ServerMessage::TimerTick { time_remaining });
                true
            }
            TickOutcome::Expired { guesses } => {
                debug!(
                    "Session {} round timed out, {} guesses filled in",
                    self.id,
                    guesses.len()
                );
                self.timer = None;
                self.send(ServerMessage::TimerTick { time_remaining: 0 });
                self.broadcast_state();
                false
            }
        }
    }

    /// Stops the clock and any in-flight target lookup.
    fn cancel_background_work(&mut self) {
        self.disarm_timer();
        self.epoch += 1;
        if let Some(pending) = self.pending_start.take() {
            pending.abort();
            info!("Cancelled pending start for session {}", self.id);
            self.send(ServerMessage::Error {
                message: GameError::StartCancelled.to_string(),
            });
        }
    }
}

pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    provider: Arc<dyn LocationProvider>,
    pool: Arc<CandidatePool>,
    settings: GameSettings,
    radius_meters: u32,
}

impl SessionManager {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        settings: GameSettings,
        radius_meters: u32,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            provider,
            pool: Arc::new(CandidatePool::default()),
            settings,
            radius_meters,
        }
    }

    pub fn with_pool(mut self, pool: CandidatePool) -> Self {
        self.pool = Arc::new(pool);
        self
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub async fn create_session(
        &self,
        request: CreateGameRequest,
    ) -> Result<(SessionId, GameSnapshot), ApiError> {
        let game_id = match (request.mode, request.join.as_deref()) {
            (GameMode::Multiplayer, Some(code)) => validate_join_code(code)?,
            (GameMode::Multiplayer, None) => generate_join_code(),
            (GameMode::Single, join) => {
                if join.is_some() {
                    debug!("Ignoring join code for a single player game");
                }
                Uuid::new_v4().to_string()
            }
        };

        let player_name = request.player_name.as_deref().unwrap_or_default();
        let game = Game::new(game_id, request.mode, player_name, self.settings);
        let session_id = Uuid::new_v4().to_string();
        let session = Session::new(session_id.clone(), game);
        let snapshot = session.lock().await.snapshot();

        self.sessions
            .write()
            .await
            .insert(session_id.clone(), session);

        info!(
            "Created session {} for game {} ({:?})",
            session_id, snapshot.state.game_id, request.mode
        );
        Ok((session_id, snapshot))
    }

    async fn session(&self, session_id: &str) -> Result<Arc<Mutex<Session>>, ApiError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| ApiError::session_not_found(session_id))
    }

    /// Resolves every round target in the background, then enters round one.
    /// The returned handle finishes once the game is playing, or is cancelled
    /// if the session is reset or removed first.
    pub async fn start_game(&self, session_id: &str) -> Result<JoinHandle<()>, ApiError> {
        let session = self.session(session_id).await?;
        let mut guard = session.lock().await;

        if guard.pending_start.is_some() {
            warn!("Session {} asked to start twice", session_id);
            return Err(GameError::StartInProgress.into());
        }
        let status = guard.game.status();
        if status != GameStatus::Lobby {
            warn!("Session {} cannot start while {}", session_id, status);
            return Err(GameError::invalid_state("start the game", status).into());
        }

        let epoch = guard.epoch;
        let count = guard.game.state.total_rounds;
        let provider = self.provider.clone();
        let pool = self.pool.clone();
        let radius_meters = self.radius_meters;
        let weak = Arc::downgrade(&session);

        let handle = tokio::spawn(async move {
            let targets =
                resolve_round_targets(provider.as_ref(), &pool, count, radius_meters).await;

            let Some(session) = weak.upgrade() else {
                return;
            };
            let mut guard = session.lock().await;
            if guard.epoch != epoch {
                debug!("Discarding targets resolved before session {} was reset", guard.id);
                return;
            }
            guard.pending_start = None;

            match guard.game.start(targets) {
                Ok(()) => {
                    guard.arm_timer();
                    guard.broadcast_state();
                }
                Err(e) => {
                    warn!("Session {} failed to start: {}", guard.id, e);
                    guard.send(ServerMessage::Error {
                        message: e.to_string(),
                    });
                }
            }
        });

        guard.pending_start = Some(handle.abort_handle());
        info!(
            "Resolving {} targets for session {} via {}",
            count,
            session_id,
            self.provider.name()
        );
        Ok(handle)
    }

    pub async fn submit_guess(
        &self,
        session_id: &str,
        location: LatLng,
    ) -> Result<PlayerGuess, ApiError> {
        let session = self.session(session_id).await?;
        let mut guard = session.lock().await;

        let player_id = guard.game.local_player_id();
        let guess = guard.game.submit_guess(player_id, location)?;

        // The local clock stops as soon as the local player has answered.
        guard.disarm_timer();
        guard.broadcast_state();
        Ok(guess)
    }

    pub async fn next_round(&self, session_id: &str) -> Result<RoundAdvance, ApiError> {
        let session = self.session(session_id).await?;
        let mut guard = session.lock().await;

        let advance = guard.game.next_round()?;
        match advance {
            RoundAdvance::NextRound(_) => guard.arm_timer(),
            RoundAdvance::GameOver => guard.disarm_timer(),
        }
        guard.broadcast_state();
        Ok(advance)
    }

    pub async fn reset_game(&self, session_id: &str) -> Result<GameSnapshot, ApiError> {
        let session = self.session(session_id).await?;
        let mut guard = session.lock().await;

        guard.cancel_background_work();
        guard.game.reset();
        guard.broadcast_state();
        Ok(guard.snapshot())
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<GameSnapshot, ApiError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;
        Ok(guard.snapshot())
    }

    pub async fn summary(&self, session_id: &str) -> Result<GameSummary, ApiError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;
        Ok(guard.game.summary())
    }

    pub async fn timer_armed(&self, session_id: &str) -> Result<bool, ApiError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;
        Ok(guard.is_timer_armed())
    }

    pub async fn start_pending(&self, session_id: &str) -> Result<bool, ApiError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;
        Ok(guard.is_start_pending())
    }

    pub async fn subscribe(
        &self,
        session_id: &str,
    ) -> Result<broadcast::Receiver<ServerMessage>, ApiError> {
        let session = self.session(session_id).await?;
        let guard = session.lock().await;
        Ok(guard.updates.subscribe())
    }

    /// Leaving: tears down the clock and pending lookups, then forgets the
    /// session.
    pub async fn remove_session(&self, session_id: &str) -> Result<(), ApiError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| ApiError::session_not_found(session_id))?;

        session.lock().await.cancel_background_work();
        info!("Removed session {}", session_id);
        Ok(())
    }

    pub async fn cleanup_expired_sessions(&self, timeout: Duration) -> usize {
        let sessions: Vec<(SessionId, Arc<Mutex<Session>>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, session)| (id.clone(), session.clone()))
            .collect();

        let mut expired = Vec::new();
        for (id, session) in sessions {
            if session.lock().await.game.is_expired(timeout) {
                expired.push(id);
            }
        }

        let mut removed = 0;
        for id in expired {
            if self.remove_session(&id).await.is_ok() {
                info!("Removed idle session {}", id);
                removed += 1;
            }
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_code_shape() {
        for _ in 0..100 {
            let code = generate_join_code();
            assert_eq!(code.len(), JOIN_CODE_LENGTH);
            assert!(code.bytes().all(|b| JOIN_CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_join_code_validation() {
        assert_eq!(validate_join_code(" AB12CD ").unwrap(), "AB12CD");
        assert!(validate_join_code(&Uuid::new_v4().to_string()).is_ok());
        assert!(validate_join_code("").is_err());
        assert!(validate_join_code("not a code").is_err());
        assert!(validate_join_code(&"A".repeat(65)).is_err());
    }
}
