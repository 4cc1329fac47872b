//! Engine events.
//!
//! The engine queues an event for everything a shell may want to react to:
//! animations, sounds, error toasts. Collaborator failures that do not
//! fail the calling operation (a score that could not be saved) are only
//! reported here.

use serde::{Deserialize, Serialize};

use crate::core::CardIdentity;
use crate::leaderboard::ScoreRecord;

/// Something that happened inside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A new board was dealt. `game` counts games dealt by this engine.
    GameDealt { game: u64, pair_count: usize },

    /// The deck provider failed; the previous game (if any) is untouched.
    ProviderFailed { reason: String },

    /// First card of the game turned; the clock is running.
    PlayStarted,

    /// A card was turned face-up.
    CardRevealed { index: usize, identity: CardIdentity },

    /// Two selected cards matched and stay face-up.
    PairMatched { first: usize, second: usize },

    /// Two selected cards differ and flip back after the pause.
    PairMissed { first: usize, second: usize },

    /// The resolution pause ended.
    SelectionCleared,

    /// Every pair is matched.
    GameOver { moves: u32, elapsed_secs: u64 },

    /// The score for the finished game was stored.
    ScoreSubmitted(ScoreRecord),

    /// The score could not be stored. The game stays over.
    ScoreSubmissionFailed { reason: String },

    /// The leaderboard snapshot was replaced.
    LeaderboardRefreshed { len: usize },

    /// The leaderboard could not be fetched; the old snapshot is kept.
    LeaderboardUnavailable { reason: String },
}

impl EngineEvent {
    /// True for events reporting a collaborator failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            EngineEvent::ProviderFailed { .. }
                | EngineEvent::ScoreSubmissionFailed { .. }
                | EngineEvent::LeaderboardUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_failure() {
        assert!(EngineEvent::ProviderFailed { reason: "x".into() }.is_failure());
        assert!(EngineEvent::ScoreSubmissionFailed { reason: "x".into() }.is_failure());
        assert!(!EngineEvent::PlayStarted.is_failure());
        assert!(!EngineEvent::LeaderboardRefreshed { len: 0 }.is_failure());
    }

    #[test]
    fn test_serialization() {
        let event = EngineEvent::PairMatched { first: 1, second: 4 };
        let json = serde_json::to_string(&event).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
