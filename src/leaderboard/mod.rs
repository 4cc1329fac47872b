//! Leaderboard: score records, ranking and stores.
//!
//! ## Ranking
//!
//! Records are ordered by moves ascending, then time ascending, then
//! insertion order (earliest first). Every store in this crate assigns a
//! monotonically increasing `sequence` on insert, so ties are always
//! broken the same way.
//!
//! ## Stores
//!
//! - [`InMemoryLeaderboard`]: process-local.
//! - [`FileLeaderboard`]: persisted to a single file with `bincode`.

pub mod file;
pub mod memory;

pub use file::FileLeaderboard;
pub use memory::InMemoryLeaderboard;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One completed game. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Store-assigned insertion order.
    pub sequence: u64,
    pub player: String,
    pub moves: u32,
    pub time_secs: u64,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Leaderboard order: fewer moves, then less time, then earlier.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        (self.moves, self.time_secs, self.sequence).cmp(&(
            other.moves,
            other.time_secs,
            other.sequence,
        ))
    }
}

/// Sort `records` into leaderboard order and keep the best `k`.
#[must_use]
pub fn top_k<'a, I>(records: I, k: usize) -> Vec<ScoreRecord>
where
    I: IntoIterator<Item = &'a ScoreRecord>,
{
    let mut ranked: Vec<ScoreRecord> = records.into_iter().cloned().collect();
    ranked.sort_by(ScoreRecord::rank_cmp);
    ranked.truncate(k);
    ranked
}

/// Persistent score storage.
pub trait LeaderboardStore {
    /// Append a record. The store assigns its timestamp and sequence.
    fn submit_score(
        &mut self,
        player: &str,
        moves: u32,
        time_secs: u64,
    ) -> Result<ScoreRecord, StoreError>;

    /// Up to `k` records in leaderboard order.
    fn fetch_top_scores(&mut self, k: usize) -> Result<Vec<ScoreRecord>, StoreError>;
}

impl<T: LeaderboardStore + ?Sized> LeaderboardStore for Box<T> {
    fn submit_score(
        &mut self,
        player: &str,
        moves: u32,
        time_secs: u64,
    ) -> Result<ScoreRecord, StoreError> {
        (**self).submit_score(player, moves, time_secs)
    }

    fn fetch_top_scores(&mut self, k: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        (**self).fetch_top_scores(k)
    }
}

impl<T: LeaderboardStore + ?Sized> LeaderboardStore for &mut T {
    fn submit_score(
        &mut self,
        player: &str,
        moves: u32,
        time_secs: u64,
    ) -> Result<ScoreRecord, StoreError> {
        (**self).submit_score(player, moves, time_secs)
    }

    fn fetch_top_scores(&mut self, k: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        (**self).fetch_top_scores(k)
    }
}

/// Cached top-K ranking shown to the player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    records: Vector<ScoreRecord>,
}

impl LeaderboardSnapshot {
    /// Wrap records already in leaderboard order.
    #[must_use]
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best record, if any.
    #[must_use]
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: u64, moves: u32, time_secs: u64) -> ScoreRecord {
        ScoreRecord {
            sequence,
            player: format!("p{}", sequence),
            moves,
            time_secs,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rank_order() {
        let records = vec![
            record(0, 12, 30),
            record(1, 10, 50),
            record(2, 10, 40),
            record(3, 10, 40),
        ];

        let ranked: Vec<u64> = top_k(&records, 10).iter().map(|r| r.sequence).collect();
        assert_eq!(ranked, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_top_k_truncates() {
        let records: Vec<_> = (0..10).map(|i| record(i, 20 - i as u32, 0)).collect();
        let top = top_k(&records, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].moves, 11);
        assert!(top_k(&records, 0).is_empty());
    }

    #[test]
    fn test_snapshot() {
        let snapshot = LeaderboardSnapshot::new(top_k(&[record(0, 9, 9), record(1, 8, 8)], 5));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.best().map(|r| r.sequence), Some(1));
        assert!(LeaderboardSnapshot::default().is_empty());
    }
}
