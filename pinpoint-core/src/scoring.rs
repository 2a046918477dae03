use pinpoint_types::{LatLng, MAX_SCORE};

/// Width of the Gaussian distance decay, in kilometers.
pub const SCORE_SIGMA_KM: f64 = 1500.0;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Distance part of the score before the time multiplier and rounding.
    ///
    /// Roughly 5000 at 0 km, 4730 at 500 km, 2056 at 2000 km and effectively
    /// nothing past 10000 km.
    pub fn distance_score(distance_km: f64) -> f64 {
        let ratio = distance_km / SCORE_SIGMA_KM;
        f64::from(MAX_SCORE) * (-0.5 * ratio * ratio).exp()
    }

    /// Linear time bonus in `[0.5, 1.0]`; 1.0 when no clock value is given.
    pub fn time_multiplier(time_remaining: Option<u32>, time_per_round: u32) -> f64 {
        match time_remaining {
            Some(remaining) if time_per_round > 0 => {
                let ratio = f64::from(remaining.min(time_per_round)) / f64::from(time_per_round);
                0.5 + 0.5 * ratio
            }
            _ => 1.0,
        }
    }

    /// Score for a guess `distance_km` away from the target.
    pub fn calculate_score(
        distance_km: f64,
        time_remaining: Option<u32>,
        time_per_round: u32,
    ) -> u32 {
        if distance_km <= 0.0 {
            return MAX_SCORE;
        }

        let score = Self::distance_score(distance_km)
            * Self::time_multiplier(time_remaining, time_per_round);

        score.round().clamp(0.0, f64::from(MAX_SCORE)) as u32
    }

    /// Scores a submitted guess. The no-guess sentinel always scores 0.
    pub fn score_guess(
        guess: LatLng,
        distance_km: f64,
        time_remaining: u32,
        time_per_round: u32,
    ) -> u32 {
        if guess.is_no_guess() {
            return 0;
        }
        Self::calculate_score(distance_km, Some(time_remaining), time_per_round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpoint_types::DEFAULT_TIME_PER_ROUND;

    const T: u32 = DEFAULT_TIME_PER_ROUND;

    #[test]
    fn test_exact_match_is_max_score() {
        for remaining in [None, Some(0), Some(1), Some(60), Some(T)] {
            assert_eq!(ScoringEngine::calculate_score(0.0, remaining, T), MAX_SCORE);
        }
        assert_eq!(ScoringEngine::calculate_score(-3.0, Some(0), 30), MAX_SCORE);
    }

    #[test]
    fn test_full_time_matches_untimed_score() {
        for d in [0.5, 10.0, 343.5, 1500.0, 4000.0, 12000.0] {
            assert_eq!(
                ScoringEngine::calculate_score(d, Some(T), T),
                ScoringEngine::calculate_score(d, None, T)
            );
        }
    }

    #[test]
    fn test_no_time_left_halves_score() {
        for d in [0.5, 10.0, 343.5, 1500.0, 4000.0] {
            let expected = (0.5 * ScoringEngine::distance_score(d)).round() as u32;
            assert_eq!(ScoringEngine::calculate_score(d, Some(0), T), expected);
        }
    }

    #[test]
    fn test_reference_scenario() {
        assert_eq!(ScoringEngine::calculate_score(0.0, Some(120), 120), 5000);
        assert_eq!(ScoringEngine::calculate_score(1500.0, Some(120), 120), 3033);
        assert_eq!(ScoringEngine::calculate_score(1500.0, Some(0), 120), 1516);
    }

    #[test]
    fn test_distance_score_strictly_decreasing() {
        let mut previous = ScoringEngine::distance_score(0.0);
        let mut d = 10.0;
        while d <= 20000.0 {
            let current = ScoringEngine::distance_score(d);
            assert!(current < previous, "not decreasing at {} km", d);
            previous = current;
            d += 10.0;
        }
    }

    #[test]
    fn test_score_never_increases_with_distance() {
        for remaining in [0, 30, 90, T] {
            let mut previous = ScoringEngine::calculate_score(0.0, Some(remaining), T);
            for step in 1..=2000 {
                let d = f64::from(step) * 10.0;
                let current = ScoringEngine::calculate_score(d, Some(remaining), T);
                assert!(current <= previous);
                previous = current;
            }
        }
        assert!(
            ScoringEngine::calculate_score(100.0, Some(T), T)
                > ScoringEngine::calculate_score(2000.0, Some(T), T)
        );
    }

    #[test]
    fn test_time_multiplier_bounds() {
        assert_eq!(ScoringEngine::time_multiplier(None, T), 1.0);
        assert_eq!(ScoringEngine::time_multiplier(Some(T), T), 1.0);
        assert_eq!(ScoringEngine::time_multiplier(Some(0), T), 0.5);
        assert_eq!(ScoringEngine::time_multiplier(Some(60), T), 0.75);
        // More time than the round allows is clamped.
        assert_eq!(ScoringEngine::time_multiplier(Some(500), T), 1.0);
    }

    #[test]
    fn test_sentinel_guess_scores_zero() {
        assert_eq!(ScoringEngine::score_guess(LatLng::NO_GUESS, 0.0, T, T), 0);
        assert_eq!(ScoringEngine::score_guess(LatLng::NO_GUESS, 1200.0, T, T), 0);
        assert_eq!(
            ScoringEngine::score_guess(LatLng::new(12.0, 8.0), 0.0, 0, T),
            MAX_SCORE
        );
    }
}
