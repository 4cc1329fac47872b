//! Cancellable timers for the resolution pause and the game clock.
//!
//! The engine is single-threaded and event driven, so timers are logical:
//! a [`TimerQueue`] holds deadlines on a virtual millisecond clock and the
//! driver moves that clock forward. Cancelling a [`TimerHandle`] guarantees
//! it never fires, which is what keeps a stale pause from clearing a
//! selection that belongs to a newer game.

pub mod queue;

pub use queue::{FiredTimer, TimerHandle, TimerKind, TimerQueue};
