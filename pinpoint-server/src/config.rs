use std::env;
use std::str::FromStr;
use std::time::Duration;

use pinpoint_core::{DEFAULT_SEARCH_RADIUS_METERS, GameSettings};
use pinpoint_types::{DEFAULT_ROUNDS, DEFAULT_TIME_PER_ROUND};

use crate::street_view::DEFAULT_STREET_VIEW_BASE_URL;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("invalid game settings: {0}")]
    GameSettings(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub street_view_api_key: String,
    pub street_view_base_url: String,
    pub panorama_radius_meters: u32,
    pub game_settings: GameSettings,
    pub lookup_timeout_seconds: u64,
    pub session_timeout_minutes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let street_view_api_key = lookup("STREET_VIEW_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("STREET_VIEW_API_KEY"))?;

        let game_settings = GameSettings::new(
            parse_var(&lookup, "TOTAL_ROUNDS", DEFAULT_ROUNDS)?,
            parse_var(&lookup, "TIME_PER_ROUND_SECONDS", DEFAULT_TIME_PER_ROUND)?,
        )
        .map_err(|e| ConfigError::GameSettings(e.to_string()))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT", 8080)?,
            street_view_api_key,
            street_view_base_url: lookup("STREET_VIEW_BASE_URL")
                .unwrap_or_else(|| DEFAULT_STREET_VIEW_BASE_URL.to_string()),
            panorama_radius_meters: parse_var(
                &lookup,
                "PANORAMA_RADIUS_METERS",
                DEFAULT_SEARCH_RADIUS_METERS,
            )?,
            game_settings,
            lookup_timeout_seconds: parse_var(&lookup, "LOOKUP_TIMEOUT_SECONDS", 10)?,
            session_timeout_minutes: parse_var(&lookup, "SESSION_TIMEOUT_MINUTES", 30)?,
        })
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_seconds)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_minutes * 60)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
