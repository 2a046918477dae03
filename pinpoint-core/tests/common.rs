#![allow(dead_code)]

use async_trait::async_trait;
use pinpoint_core::{Game, GameEvent, GameEventHandler, GameSettings, LocationError, LocationProvider};
use pinpoint_types::{GameMode, LatLng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PARIS: LatLng = LatLng::new(48.8566, 2.3522);
pub const BERLIN: LatLng = LatLng::new(52.5200, 13.4050);
pub const SYDNEY: LatLng = LatLng::new(-33.8688, 151.2093);

/// Creates a single player game with default settings
pub fn create_single_game(name: &str) -> Game {
    Game::new(
        uuid::Uuid::new_v4().to_string(),
        GameMode::Single,
        name,
        GameSettings::default(),
    )
}

/// Creates a single player game with custom round count and clock
pub fn create_game_with_settings(total_rounds: u32, time_per_round: u32) -> Game {
    let settings = GameSettings::new(total_rounds, time_per_round).unwrap();
    Game::new(
        uuid::Uuid::new_v4().to_string(),
        GameMode::Single,
        "Tester",
        settings,
    )
}

/// Provider that answers every lookup with the candidate itself
pub struct EchoProvider {
    pub calls: AtomicUsize,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for EchoProvider {
    async fn resolve_playable_location(
        &self,
        candidate: LatLng,
        _radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(candidate))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Provider whose service is always down
pub struct OfflineProvider;

#[async_trait]
impl LocationProvider for OfflineProvider {
    async fn resolve_playable_location(
        &self,
        _candidate: LatLng,
        _radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError> {
        Err(LocationError::Unavailable("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Lets the round clock run out, returning how many ticks it took
pub fn run_out_clock(game: &mut Game) -> u32 {
    let mut ticks = 0;
    while game.state.time_remaining > 0 && !game.has_guessed() {
        game.tick();
        ticks += 1;
    }
    ticks
}
