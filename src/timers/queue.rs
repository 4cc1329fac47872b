//! Virtual-clock timer queue with cancellable handles.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the resolution pause: clear the selection.
    ResolutionPause,
    /// One elapsed-time tick.
    Tick,
}

/// Handle to a scheduled timer.
///
/// Handles are never reused, so a handle from a cancelled timer can never
/// match a later one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: u64,
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Virtual time the timer was due at.
    pub due_ms: u64,
}

/// Pending timers keyed on a virtual millisecond clock.
///
/// The owner advances the clock; timers fire in deadline order, ties in
/// scheduling order. Nothing runs on its own.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_handle: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a timer `delay_ms` from now.
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Scheduled {
            handle,
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// True if `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its deadline.
    ///
    /// Call repeatedly, then `advance_to(until_ms)`. Timers scheduled by the
    /// caller between calls are picked up if they fall inside the window.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer> {
        let pos = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;

        let timer = self.pending.remove(pos);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(FiredTimer {
            handle: timer.handle,
            kind: timer.kind,
            due_ms: timer.due_ms,
        })
    }

    /// Move the clock forward. Never moves it backward.
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
