#![allow(dead_code)]

use async_trait::async_trait;
use pinpoint_core::{GameSettings, LocationError, LocationProvider};
use pinpoint_server::session::{SessionId, SessionManager};
use pinpoint_types::{CreateGameRequest, GameMode, LatLng, ServerMessage};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;

/// Provider that finds a panorama exactly at every candidate
pub struct EchoProvider;

#[async_trait]
impl LocationProvider for EchoProvider {
    async fn resolve_playable_location(
        &self,
        candidate: LatLng,
        _radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError> {
        Ok(Some(candidate))
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Provider whose lookups never finish
pub struct StalledProvider {
    pub calls: AtomicUsize,
}

impl StalledProvider {
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
impl LocationProvider for StalledProvider {
    async fn resolve_playable_location(
        &self,
        _candidate: LatLng,
        _radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "stalled"
    }
}

/// Provider that always reports the service as denied
pub struct DeniedProvider;

#[async_trait]
impl LocationProvider for DeniedProvider {
    async fn resolve_playable_location(
        &self,
        _candidate: LatLng,
        _radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError> {
        Err(LocationError::Rejected("REQUEST_DENIED".to_string()))
    }

    fn name(&self) -> &str {
        "denied"
    }
}

/// Test setup that provides a session manager with a chosen provider
pub struct TestServerSetup {
    pub session_manager: Arc<SessionManager>,
}

impl TestServerSetup {
    pub fn new(total_rounds: u32, time_per_round: u32) -> Self {
        Self::with_provider(Arc::new(EchoProvider), total_rounds, time_per_round)
    }

    pub fn with_provider(
        provider: Arc<dyn LocationProvider>,
        total_rounds: u32,
        time_per_round: u32,
    ) -> Self {
        let settings = GameSettings::new(total_rounds, time_per_round).unwrap();
        Self {
            session_manager: Arc::new(SessionManager::new(provider, settings, 1000)),
        }
    }

    /// Creates a single player session for `name`
    pub async fn create_session(&self, name: &str) -> SessionId {
        let request = CreateGameRequest {
            mode: GameMode::Single,
            player_name: Some(name.to_string()),
            join: None,
        };
        let (session_id, _) = self.session_manager.create_session(request).await.unwrap();
        session_id
    }

    /// Starts the game and waits until round one is playing
    pub async fn start_and_wait(&self, session_id: &str) {
        let handle = self.session_manager.start_game(session_id).await.unwrap();
        handle.await.unwrap();
    }

    pub async fn time_remaining(&self, session_id: &str) -> u32 {
        self.session_manager
            .snapshot(session_id)
            .await
            .unwrap()
            .state
            .time_remaining
    }
}

/// Collects every message already waiting on the receiver
pub fn drain(receiver: &mut broadcast::Receiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    messages
}

pub fn timer_ticks(messages: &[ServerMessage]) -> Vec<u32> {
    messages
        .iter()
        .filter_map(|m| match m {
            ServerMessage::TimerTick { time_remaining } => Some(*time_remaining),
            _ => None,
        })
        .collect()
}
