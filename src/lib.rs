//! # memory-match
//!
//! Engine for the memory card game: flip two face-down cards at a time,
//! keep the pairs you find, clear the board in as few moves and seconds as
//! you can, and land on the leaderboard.
//!
//! ## Design Principles
//!
//! 1. **One owned engine**: all game state lives in a single `GameEngine`
//!    value. No globals, no shared mutable state.
//!
//! 2. **Explicit time**: the resolution pause and the game clock are
//!    cancellable timers on a virtual clock the caller advances, so
//!    dealing a new game can never be disturbed by a stale timer.
//!
//! 3. **Pluggable collaborators**: decks come from a `DeckProvider`, scores
//!    go to a `LeaderboardStore`, shuffles draw from a `RandomSource`.
//!
//! ## Example
//!
//! ```
//! use memory_match::{EngineConfig, FixedDeck, GameEngine, GamePhase, InMemoryLeaderboard};
//!
//! let config = EngineConfig::default().with_pair_count(2).with_seed(7);
//! let deck = FixedDeck::new(["sun", "moon"]);
//! let mut engine = GameEngine::new(config, deck, InMemoryLeaderboard::new()).unwrap();
//!
//! engine.start_new_game().unwrap();
//! engine.select_position(0);
//! assert_eq!(engine.phase(), GamePhase::InProgress);
//! ```
//!
//! ## Modules
//!
//! - `core`: card identities, board, game state, RNG, configuration
//! - `timers`: cancellable timers on a virtual clock
//! - `deck`: deck providers
//! - `leaderboard`: score records, ranking and stores
//! - `engine`: the game engine, events and read model
//! - `error`: error types

pub mod core;
pub mod error;
pub mod timers;
pub mod deck;
pub mod leaderboard;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Board, CardIdentity, EngineConfig, GamePhase, GameRng, GameState,
    IdentitySource, PairAttempt, RandomSource, SelectRejection, Selection,
    ANONYMOUS_PLAYER,
};

pub use crate::error::{ConfigError, EngineError, ProviderError, StoreError};

pub use crate::timers::{TimerHandle, TimerKind, TimerQueue};

pub use crate::deck::{DeckProvider, FixedDeck, StandardDeck};

pub use crate::leaderboard::{
    FileLeaderboard, InMemoryLeaderboard, LeaderboardSnapshot, LeaderboardStore, ScoreRecord,
};

pub use crate::engine::{CardFace, EngineEvent, GameEngine, GameView};
