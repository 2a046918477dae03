use async_trait::async_trait;
use pinpoint_types::LatLng;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::seeds::{FAMOUS_LOCATIONS, WORLD_CITIES};

/// Search radius handed to the provider for each candidate.
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 50_000;
/// Candidates tried per round before giving up on the provider.
pub const MAX_CANDIDATE_ATTEMPTS: usize = 10;
/// Maximum offset applied to a seed city in each axis, in degrees.
pub const CANDIDATE_JITTER_DEGREES: f64 = 0.2;

/// Errors that can occur while asking the imagery service for a panorama
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location service unreachable: {0}")]
    Unavailable(String),

    #[error("location service rejected the request: {0}")]
    Rejected(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Source of playable round targets, backed by an external imagery service.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Nearest point within `radius_meters` of `candidate` that has a
    /// viewable panorama, or `None` when there is nothing there.
    async fn resolve_playable_location(
        &self,
        candidate: LatLng,
        radius_meters: u32,
    ) -> Result<Option<LatLng>, LocationError>;

    /// Name of this provider, for logs
    fn name(&self) -> &str;
}

/// Candidate generation: seed cities with random jitter, plus the curated
/// fallback list.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    seeds: Vec<LatLng>,
    fallback: Vec<LatLng>,
}

impl Default for CandidatePool {
    fn default() -> Self {
        Self::new(WORLD_CITIES.to_vec(), FAMOUS_LOCATIONS.to_vec())
    }
}

impl CandidatePool {
    pub fn new(seeds: Vec<LatLng>, fallback: Vec<LatLng>) -> Self {
        Self { seeds, fallback }
    }

    /// One jittered candidate from a random seed city.
    pub fn pick_random_candidate<R: Rng + ?Sized>(&self, rng: &mut R) -> LatLng {
        match self.seeds.choose(rng) {
            Some(seed) => jitter(*seed, rng),
            None => self.fallback_location(rng),
        }
    }

    /// Up to [`MAX_CANDIDATE_ATTEMPTS`] candidates from distinct seed cities.
    pub fn candidates_for_round<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<LatLng> {
        let mut shuffled = self.seeds.clone();
        shuffled.shuffle(rng);
        shuffled
            .into_iter()
            .take(MAX_CANDIDATE_ATTEMPTS)
            .map(|seed| jitter(seed, rng))
            .collect()
    }

    pub fn fallback_location<R: Rng + ?Sized>(&self, rng: &mut R) -> LatLng {
        self.fallback
            .choose(rng)
            .or_else(|| FAMOUS_LOCATIONS.first())
            .copied()
            .unwrap_or(LatLng::new(48.8584, 2.2945))
    }
}

fn jitter<R: Rng + ?Sized>(seed: LatLng, rng: &mut R) -> LatLng {
    let offset_lat = (rng.random::<f64>() - 0.5) * 2.0 * CANDIDATE_JITTER_DEGREES;
    let offset_lng = (rng.random::<f64>() - 0.5) * 2.0 * CANDIDATE_JITTER_DEGREES;
    LatLng::new(
        (seed.lat + offset_lat).clamp(-90.0, 90.0),
        (seed.lng + offset_lng).clamp(-180.0, 180.0),
    )
}

/// Resolves one playable target: tries fresh candidates against the provider
/// and falls back to a curated location when none resolve.
pub async fn resolve_target(
    provider: &dyn LocationProvider,
    pool: &CandidatePool,
    radius_meters: u32,
) -> LatLng {
    // The thread-local rng must not live across an await point.
    let (candidates, fallback) = {
        let mut rng = rand::rng();
        (pool.candidates_for_round(&mut rng), pool.fallback_location(&mut rng))
    };

    for candidate in candidates {
        match provider
            .resolve_playable_location(candidate, radius_meters)
            .await
        {
            Ok(Some(location)) if location.is_valid() && !location.is_no_guess() => {
                debug!("{} resolved {} to {}", provider.name(), candidate, location);
                return location;
            }
            Ok(Some(location)) => {
                warn!("{} returned unusable location {}", provider.name(), location);
            }
            Ok(None) => {
                debug!("No panorama near {}", candidate);
            }
            Err(e) => {
                warn!("{} lookup for {} failed: {}", provider.name(), candidate, e);
            }
        }
    }

    info!("No candidate resolved, using fallback location {}", fallback);
    fallback
}

/// Resolves every round target up front so the whole game's difficulty is
/// fixed before play starts. Never fails.
pub async fn resolve_round_targets(
    provider: &dyn LocationProvider,
    pool: &CandidatePool,
    count: u32,
    radius_meters: u32,
) -> Vec<LatLng> {
    let mut targets = Vec::with_capacity(count as usize);
    for _ in 0..count {
        targets.push(resolve_target(provider, pool, radius_meters).await);
    }
    info!("Resolved {} round targets via {}", targets.len(), provider.name());
    targets
}
