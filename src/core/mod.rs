//! Core game types: card identities, board, state, RNG, configuration.
//!
//! Nothing in here schedules timers or talks to collaborators; that is the
//! engine's job.

pub mod card;
pub mod board;
pub mod rng;
pub mod config;
pub mod state;

pub use card::CardIdentity;
pub use board::{validate_deck, Board};
pub use rng::{permute, GameRng, IdentitySource, RandomSource};
pub use config::{player_name_or_anonymous, EngineConfig, ANONYMOUS_PLAYER};
pub use state::{GamePhase, GameState, PairAttempt, SelectRejection, Selection};
