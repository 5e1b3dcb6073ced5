//! Game configuration loaded from environment variables

use crate::types::HAND_LIMIT;
use std::str::FromStr;

/// Errors that can occur while reading configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{key} must be at least 1")]
    Zero { key: &'static str },
}

/// Per-session game settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Rounds to play before the game is final
    pub rounds_total: u32,
    /// Maximum count of response cards a player may hold
    pub hand_limit: usize,
    /// Seed for card draws (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds_total: 1,
            hand_limit: HAND_LIMIT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load config from environment variables
    /// ROUNDS_TOTAL, HAND_LIMIT and GAME_SEED are all optional.
    /// Invalid values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let rounds_total = read_env::<u32>("ROUNDS_TOTAL")
            .and_then(|v| non_zero("ROUNDS_TOTAL", v))
            .unwrap_or_else(|e| {
                tracing::warn!("{}, using default {}", e, defaults.rounds_total);
                None
            })
            .unwrap_or(defaults.rounds_total);

        let hand_limit = read_env::<usize>("HAND_LIMIT")
            .and_then(|v| non_zero("HAND_LIMIT", v))
            .unwrap_or_else(|e| {
                tracing::warn!("{}, using default {}", e, defaults.hand_limit);
                None
            })
            .unwrap_or(defaults.hand_limit);

        let seed = read_env::<u64>("GAME_SEED").unwrap_or_else(|e| {
            tracing::warn!("{}, draws will be seeded from the OS", e);
            None
        });

        if let Some(seed) = seed {
            tracing::info!("Card draws seeded with {}", seed);
        }

        Self {
            rounds_total,
            hand_limit,
            seed,
        }
    }
}

/// Parse an env var, treating missing or blank values as unset
fn read_env<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    let value = match std::env::var(key) {
        Ok(v) => v.trim().to_string(),
        Err(_) => return Ok(None),
    };
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn non_zero<T: Default + PartialEq>(
    key: &'static str,
    value: Option<T>,
) -> Result<Option<T>, ConfigError> {
    match value {
        Some(v) if v == T::default() => Err(ConfigError::Zero { key }),
        other => Ok(other),
    }
}
