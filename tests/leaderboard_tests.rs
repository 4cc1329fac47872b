//! Leaderboard tests.
//!
//! These tests verify score submission and ranking through the engine:
//! - Store failures are non-fatal and never retried
//! - Fetch failures keep the previous snapshot
//! - Ranking by moves, then time, then insertion order
//! - The file-backed store behind a live engine

use std::cell::Cell;
use std::rc::Rc;

use memory_match::core::IdentitySource;
use memory_match::{
    EngineConfig, EngineEvent, FileLeaderboard, FixedDeck, GameEngine, GamePhase,
    InMemoryLeaderboard, LeaderboardStore, ScoreRecord, StoreError,
};

/// Store wrapper counting calls, with a switch to fail submissions.
struct CountingStore {
    inner: InMemoryLeaderboard,
    submit_calls: Rc<Cell<usize>>,
    fail_submit: Rc<Cell<bool>>,
}

impl LeaderboardStore for CountingStore {
    fn submit_score(
        &mut self,
        player: &str,
        moves: u32,
        time_secs: u64,
    ) -> Result<ScoreRecord, StoreError> {
        self.submit_calls.set(self.submit_calls.get() + 1);
        if self.fail_submit.get() {
            return Err(StoreError::Unavailable("submit refused".into()));
        }
        self.inner.submit_score(player, moves, time_secs)
    }

    fn fetch_top_scores(&mut self, k: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        self.inner.fetch_top_scores(k)
    }
}

fn ab_engine<L: LeaderboardStore>(store: L) -> GameEngine<FixedDeck, L, IdentitySource> {
    let mut engine = GameEngine::with_rng(
        EngineConfig::default().with_pair_count(2),
        FixedDeck::new(["A", "B"]),
        store,
        IdentitySource,
    )
    .unwrap();
    engine.start_new_game().unwrap();
    engine
}

/// Board is [A, B, A, B]. Finish it after `misses` missed attempts, idling
/// `idle_ms` between the two matches. Each pause adds one second.
fn finish<L: LeaderboardStore>(
    engine: &mut GameEngine<FixedDeck, L, IdentitySource>,
    misses: usize,
    idle_ms: u64,
) {
    for _ in 0..misses {
        engine.select_position(0);
        engine.select_position(1);
        engine.advance_clock(1_000);
    }
    engine.select_position(0);
    engine.select_position(2);
    engine.advance_clock(1_000 + idle_ms);
    engine.select_position(1);
    engine.select_position(3);
}

/// Failed submission: game stays over, failure reported, no retry.
#[test]
fn test_submit_failure_is_non_fatal() {
    let submit_calls = Rc::new(Cell::new(0));
    let fail_submit = Rc::new(Cell::new(true));
    let store = CountingStore {
        inner: InMemoryLeaderboard::new(),
        submit_calls: submit_calls.clone(),
        fail_submit: fail_submit.clone(),
    };
    let mut engine = ab_engine(store);
    engine.drain_events();

    finish(&mut engine, 0, 0);

    assert_eq!(engine.phase(), GamePhase::Over);
    assert_eq!(submit_calls.get(), 1);
    assert!(engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, EngineEvent::ScoreSubmissionFailed { .. })));

    // Store recovers; the engine does not try again
    fail_submit.set(false);
    engine.advance_clock(5_000);
    engine.select_position(0);
    assert_eq!(submit_calls.get(), 1);
    assert!(engine.store().inner.is_empty());
}

/// Exactly one submission per completed game, across several games.
#[test]
fn test_one_submission_per_game() {
    let submit_calls = Rc::new(Cell::new(0));
    let store = CountingStore {
        inner: InMemoryLeaderboard::new(),
        submit_calls: submit_calls.clone(),
        fail_submit: Rc::new(Cell::new(false)),
    };
    let mut engine = ab_engine(store);

    for game in 1..=3 {
        finish(&mut engine, 0, 0);
        assert_eq!(submit_calls.get(), game);
        engine.start_new_game().unwrap();
    }
}

/// Fetch failure keeps the snapshot from the last good fetch.
#[test]
fn test_fetch_failure_keeps_snapshot() {
    let mut engine = ab_engine(InMemoryLeaderboard::new());
    finish(&mut engine, 1, 0);
    let snapshot = engine.leaderboard().clone();
    assert_eq!(snapshot.len(), 1);

    engine.store_mut().set_available(false);
    let err = engine.refresh_leaderboard().unwrap_err();
    assert!(err.is_store_unavailable());
    assert_eq!(engine.leaderboard(), &snapshot);
}

/// Store down at construction: empty snapshot, engine still usable.
#[test]
fn test_store_down_at_construction() {
    let mut store = InMemoryLeaderboard::new();
    store.set_available(false);
    let mut engine = ab_engine(store);

    assert!(engine.leaderboard().is_empty());
    assert!(engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, EngineEvent::LeaderboardUnavailable { .. })));

    finish(&mut engine, 0, 0);
    assert_eq!(engine.phase(), GamePhase::Over);
    assert!(engine.leaderboard().is_empty());
}

/// Ranking across games: moves first, then time, then who got there first.
#[test]
fn test_ranking_across_games() {
    let config = EngineConfig::default()
        .with_pair_count(2)
        .with_leaderboard_size(3);
    let mut engine = GameEngine::with_rng(
        config,
        FixedDeck::new(["A", "B"]),
        InMemoryLeaderboard::new(),
        IdentitySource,
    )
    .unwrap();

    let games = [
        ("slow", 0, 30_000),
        ("clumsy", 2, 0),
        ("quick", 0, 0),
        ("quick-tie", 0, 0),
    ];
    for (name, misses, idle_ms) in games {
        engine.set_player_name(Some(name));
        engine.start_new_game().unwrap();
        finish(&mut engine, misses, idle_ms);
    }

    let names: Vec<&str> = engine
        .leaderboard()
        .iter()
        .map(|r| r.player.as_str())
        .collect();
    assert_eq!(names, vec!["quick", "quick-tie", "slow"]);
}

/// Scores submitted through the engine survive reopening the file.
#[test]
fn test_file_store_behind_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.bin");

    {
        let store = FileLeaderboard::open(&path).unwrap();
        let mut engine = ab_engine(store);
        engine.set_player_name(Some("ada"));
        finish(&mut engine, 1, 0);
        assert_eq!(engine.leaderboard().len(), 1);
    }

    let store = FileLeaderboard::open(&path).unwrap();
    let engine = ab_engine(store);
    let best = engine.leaderboard().best().unwrap();
    assert_eq!(best.player, "ada");
    assert_eq!(best.moves, 3);
}
