//! Game engine: owns one game at a time and drives it from discrete events.
//!
//! ## Event sources
//!
//! - Card clicks: `GameEngine::select_position`
//! - Time: `GameEngine::advance_clock` fires the resolution pause and ticks
//! - Deck provider and leaderboard store: called synchronously from
//!   `start_new_game` and on game completion
//!
//! ## Outputs
//!
//! - `GameView` read model
//! - `EngineEvent` queue

pub mod events;
pub mod game;
pub mod view;

pub use events::EngineEvent;
pub use game::GameEngine;
pub use view::{CardFace, GameView};
