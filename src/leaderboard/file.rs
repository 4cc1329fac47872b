//! File-backed leaderboard store.
//!
//! The whole table is encoded with `bincode` and rewritten on every
//! submission: first to a sibling file named after the table plus `.tmp`
//! (`scores.bin` writes through `scores.bin.tmp`), then renamed over the
//! original, so a crash mid-write leaves the previous table intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{top_k, LeaderboardStore, ScoreRecord};
use crate::error::StoreError;

/// On-disk format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoredTable {
    version: u32,
    records: Vec<ScoreRecord>,
}

/// Leaderboard persisted to a single file.
#[derive(Debug)]
pub struct FileLeaderboard {
    path: PathBuf,
    records: Vec<ScoreRecord>,
    next_sequence: u64,
}

impl FileLeaderboard {
    /// Open the store at `path`. A missing file is an empty leaderboard.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let records = match fs::read(&path) {
            Ok(bytes) => {
                let table: StoredTable = bincode::deserialize(&bytes)?;
                if table.version != FORMAT_VERSION {
                    return Err(StoreError::Unavailable(format!(
                        "unsupported leaderboard format version {}",
                        table.version
                    )));
                }
                table.records
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let next_sequence = records
            .iter()
            .map(|r| r.sequence.saturating_add(1))
            .max()
            .unwrap_or(0);
        debug!(path = %path.display(), records = records.len(), "opened leaderboard file");

        Ok(Self {
            path,
            records,
            next_sequence,
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self, records: &[ScoreRecord]) -> Result<(), StoreError> {
        let table = StoredTable {
            version: FORMAT_VERSION,
            records: records.to_vec(),
        };
        let bytes = bincode::serialize(&table)?;

        let tmp = temp_path(&self.path);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// `path` with `.tmp` appended to its full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

impl LeaderboardStore for FileLeaderboard {
    fn submit_score(
        &mut self,
        player: &str,
        moves: u32,
        time_secs: u64,
    ) -> Result<ScoreRecord, StoreError> {
        let record = ScoreRecord {
            sequence: self.next_sequence,
            player: player.to_string(),
            moves,
            time_secs,
            created_at: Utc::now(),
        };

        let mut next = self.records.clone();
        next.push(record.clone());
        self.persist(&next)?;

        self.records = next;
        self.next_sequence = self.next_sequence.saturating_add(1);
        Ok(record)
    }

    fn fetch_top_scores(&mut self, k: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(top_k(&self.records, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLeaderboard::open(dir.path().join("scores.bin")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_reopen_restores_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.bin");

        {
            let mut store = FileLeaderboard::open(&path).unwrap();
            store.submit_score("ada", 9, 40).unwrap();
            store.submit_score("bob", 8, 50).unwrap();
        }

        let mut store = FileLeaderboard::open(&path).unwrap();
        assert_eq!(store.len(), 2);

        let top = store.fetch_top_scores(5).unwrap();
        assert_eq!(top[0].player, "bob");
        assert_eq!(top[1].player, "ada");

        // Sequence continues after the stored records
        let next = store.submit_score("cy", 8, 50).unwrap();
        assert_eq!(next.sequence, 2);
        assert!(!dir.path().join("scores.bin.tmp").exists());
    }

    #[test]
    fn test_stores_sharing_a_stem_keep_separate_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("a.bin");
        let dat = dir.path().join("a.dat");
        assert_ne!(temp_path(&bin), temp_path(&dat));
        assert_eq!(temp_path(&bin), dir.path().join("a.bin.tmp"));

        // A stale temp file for one store does not leak into the other
        fs::write(dir.path().join("a.tmp"), b"stale").unwrap();
        let mut first = FileLeaderboard::open(&bin).unwrap();
        let mut second = FileLeaderboard::open(&dat).unwrap();
        first.submit_score("ada", 3, 10).unwrap();
        second.submit_score("bob", 4, 20).unwrap();

        let first = FileLeaderboard::open(&bin).unwrap();
        let second = FileLeaderboard::open(&dat).unwrap();
        assert_eq!(first.records[0].player, "ada");
        assert_eq!(second.records[0].player, "bob");
        assert_eq!(fs::read(dir.path().join("a.tmp")).unwrap(), b"stale");
    }

    #[test]
    fn test_sequence_saturates_on_crafted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.bin");
        let table = StoredTable {
            version: FORMAT_VERSION,
            records: vec![ScoreRecord {
                sequence: u64::MAX,
                player: "mallory".into(),
                moves: 1,
                time_secs: 1,
                created_at: Utc::now(),
            }],
        };
        fs::write(&path, bincode::serialize(&table).unwrap()).unwrap();

        let mut store = FileLeaderboard::open(&path).unwrap();
        assert_eq!(store.next_sequence, u64::MAX);
        let record = store.submit_score("ada", 2, 2).unwrap();
        assert_eq!(record.sequence, u64::MAX);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.bin");
        fs::write(&path, [0xFFu8; 3]).unwrap();

        assert!(FileLeaderboard::open(&path).is_err());
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("scores.bin");

        let mut store = FileLeaderboard::open(&path).unwrap();
        assert!(matches!(
            store.submit_score("ada", 1, 1),
            Err(StoreError::Io(_))
        ));
        assert!(store.is_empty());
        assert!(store.fetch_top_scores(5).unwrap().is_empty());
    }
}
