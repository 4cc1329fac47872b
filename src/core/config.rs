//! Engine configuration.
//!
//! All fields have defaults matching the classic game: eight pairs, a
//! one-second resolution pause, one tick per second and a top-5
//! leaderboard. Configs can be built in code or loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Player name used when none (or a blank one) is given.
pub const ANONYMOUS_PLAYER: &str = "Anonymous";

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unique identities per game (board length is twice this).
    pub pair_count: usize,

    /// Number of records kept in the leaderboard snapshot.
    pub leaderboard_size: usize,

    /// How long an attempted pair stays face-up before the selection clears.
    pub resolution_pause_ms: u64,

    /// Wall-clock length of one elapsed-time tick.
    pub tick_interval_ms: u64,

    /// Name attached to submitted scores.
    pub player_name: String,

    /// Shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pair_count: 8,
            leaderboard_size: 5,
            resolution_pause_ms: 1_000,
            tick_interval_ms: 1_000,
            player_name: ANONYMOUS_PLAYER.to_string(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(invalid("pair_count", "must be at least 1"));
        }
        if self.leaderboard_size == 0 {
            return Err(invalid("leaderboard_size", "must be at least 1"));
        }
        if self.resolution_pause_ms == 0 {
            return Err(invalid("resolution_pause_ms", "must be positive"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be positive"));
        }
        Ok(())
    }

    /// Create a new config with a custom pair count.
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Create a new config with a custom leaderboard size.
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    /// Create a new config with a custom resolution pause.
    pub fn with_resolution_pause_ms(mut self, ms: u64) -> Self {
        self.resolution_pause_ms = ms;
        self
    }

    /// Create a new config with a custom tick interval.
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Create a new config with a custom player name.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Create a new config with a custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Normalize a player name: trimmed, or anonymous if blank.
#[must_use]
pub fn player_name_or_anonymous(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => ANONYMOUS_PLAYER.to_string(),
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
