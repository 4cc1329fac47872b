//! Error types.
//!
//! Every failure in this crate is recoverable and isolated to the single
//! operation that raised it. The engine keeps its last-known-good state
//! (board, leaderboard snapshot) and reports the error upward.

use thiserror::Error;

/// Deck provider failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("deck source unreachable: {0}")]
    Unreachable(String),

    #[error("malformed deck: {0}")]
    Malformed(String),
}

/// Leaderboard store failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("leaderboard store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Invalid engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error surfaced by `GameEngine` operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl EngineError {
    /// True for deck provider failures.
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(self, EngineError::ProviderUnavailable(_))
    }

    /// True for leaderboard store failures.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, EngineError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_converts() {
        let err: EngineError = ProviderError::Unreachable("timeout".into()).into();
        assert!(err.is_provider_unavailable());
        assert!(!err.is_store_unavailable());
        assert_eq!(
            err.to_string(),
            "provider unavailable: deck source unreachable: timeout"
        );
    }

    #[test]
    fn test_store_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EngineError = StoreError::from(io).into();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::Invalid {
            field: "pair_count",
            reason: "must be at least 1".into(),
        };
        assert_eq!(err.to_string(), "invalid pair_count: must be at least 1");
    }
}
