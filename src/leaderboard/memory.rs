//! In-memory leaderboard store.

use chrono::Utc;

use super::{top_k, LeaderboardStore, ScoreRecord};
use crate::error::StoreError;

/// Process-local store. Can be switched offline to simulate outages.
#[derive(Clone, Debug)]
pub struct InMemoryLeaderboard {
    records: Vec<ScoreRecord>,
    next_sequence: u64,
    available: bool,
}

impl Default for InMemoryLeaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLeaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 0,
            available: true,
        }
    }

    /// Toggle availability. While offline every call fails.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store offline".into()))
        }
    }
}

impl LeaderboardStore for InMemoryLeaderboard {
    fn submit_score(
        &mut self,
        player: &str,
        moves: u32,
        time_secs: u64,
    ) -> Result<ScoreRecord, StoreError> {
        self.check_available()?;

        let record = ScoreRecord {
            sequence: self.next_sequence,
            player: player.to_string(),
            moves,
            time_secs,
            created_at: Utc::now(),
        };
        self.next_sequence += 1;
        self.records.push(record.clone());
        Ok(record)
    }

    fn fetch_top_scores(&mut self, k: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        self.check_available()?;
        Ok(top_k(&self.records, k))
    }
}
