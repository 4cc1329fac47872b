//! The game engine: state machine, timers and collaborator orchestration.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::events::EngineEvent;
use super::view::GameView;
use crate::core::{
    player_name_or_anonymous, Board, EngineConfig, GamePhase, GameRng, GameState, PairAttempt,
    RandomSource, Selection,
};
use crate::deck::DeckProvider;
use crate::error::EngineError;
use crate::leaderboard::{LeaderboardSnapshot, LeaderboardStore};
use crate::timers::{FiredTimer, TimerHandle, TimerKind, TimerQueue};

/// A memory game in progress, plus everything it talks to.
///
/// One engine value owns the current game, its timers, the deck provider,
/// the leaderboard store and the shuffle source. All operations run to
/// completion on the caller's thread.
///
/// ## Driving the engine
///
/// - `start_new_game` deals a board (replacing any running game).
/// - `select_position` on every card click.
/// - `advance_clock` as wall-clock time passes; this fires the resolution
///   pause and the elapsed-time tick.
/// - `view` and `drain_events` to render.
///
/// Events queue up until drained. Only the newest `EVENT_CAPACITY` are
/// kept, so a shell that never drains loses the oldest ones.
pub struct GameEngine<D, L, R = GameRng> {
    config: EngineConfig,
    deck: D,
    store: L,
    rng: R,

    state: GameState,
    timers: TimerQueue,
    /// Pending end of the resolution pause.
    pause_timer: Option<TimerHandle>,
    /// Pending next tick of the game clock.
    tick_timer: Option<TimerHandle>,

    leaderboard: LeaderboardSnapshot,
    player_name: String,
    games_dealt: u64,
    events: VecDeque<EngineEvent>,
}

impl<D: DeckProvider, L: LeaderboardStore> GameEngine<D, L, GameRng> {
    /// Create an engine shuffling with a `GameRng`, seeded from
    /// `config.seed` or from entropy.
    pub fn new(config: EngineConfig, deck: D, store: L) -> Result<Self, EngineError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Self::with_rng(config, deck, store, rng)
    }
}

impl<D: DeckProvider, L: LeaderboardStore, R: RandomSource> GameEngine<D, L, R> {
    /// Most events held between two `drain_events` calls.
    pub const EVENT_CAPACITY: usize = 1024;

    /// Create an engine with an explicit shuffle source.
    ///
    /// The leaderboard is fetched once here; a store failure is reported as
    /// an event and leaves the snapshot empty.
    pub fn with_rng(config: EngineConfig, deck: D, store: L, rng: R) -> Result<Self, EngineError> {
        config.validate()?;

        let player_name = player_name_or_anonymous(Some(&config.player_name));
        let mut engine = Self {
            config,
            deck,
            store,
            rng,
            state: GameState::default(),
            timers: TimerQueue::new(),
            pause_timer: None,
            tick_timer: None,
            leaderboard: LeaderboardSnapshot::default(),
            player_name,
            games_dealt: 0,
            events: VecDeque::new(),
        };

        // Failure is already logged and queued as an event.
        let _ = engine.refresh_leaderboard();
        Ok(engine)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.state.moves()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.state.elapsed_secs()
    }

    /// Current leaderboard snapshot.
    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardSnapshot {
        &self.leaderboard
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Set the name used for future score submissions. Blank or `None`
    /// falls back to the anonymous placeholder.
    pub fn set_player_name(&mut self, name: Option<&str>) {
        self.player_name = player_name_or_anonymous(name);
    }

    #[must_use]
    pub fn deck(&self) -> &D {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut D {
        &mut self.deck
    }

    #[must_use]
    pub fn store(&self) -> &L {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut L {
        &mut self.store
    }

    /// Virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Virtual time at which the next timer fires, if any is pending.
    ///
    /// A shell backed by real timers sleeps until then and calls
    /// `advance_clock` with the difference.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// True while a two-card selection is waiting for its pause to end.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.pause_timer.is_some()
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::new(&self.state, &self.leaderboard)
    }

    /// Take all queued events, oldest first. Events dropped for lack of
    /// room are not reported.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    // === Operations ===

    /// Deal a new game.
    ///
    /// On success the old game is discarded: every pending timer is
    /// cancelled and the phase is `NotStarted`. On provider failure nothing
    /// changes, including the timers of a game still running.
    pub fn start_new_game(&mut self) -> Result<(), EngineError> {
        let pair_count = self.config.pair_count;
        let dealt = self
            .deck
            .request_deck(pair_count)
            .and_then(|identities| Board::deal(&identities, pair_count, &mut self.rng));

        let board = match dealt {
            Ok(board) => board,
            Err(e) => {
                warn!(error = %e, "deck provider failed, keeping current game");
                self.push_event(EngineEvent::ProviderFailed {
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        };

        self.cancel_timers();
        self.state = GameState::new(board);
        self.games_dealt += 1;

        info!(game = self.games_dealt, pair_count, "dealt new game");
        self.push_event(EngineEvent::GameDealt {
            game: self.games_dealt,
            pair_count,
        });
        Ok(())
    }

    /// Turn the card at `index` face-up.
    ///
    /// Out-of-bounds, already matched or already selected positions, and
    /// any click while two cards await resolution, are ignored and return
    /// `None`.
    pub fn select_position(&mut self, index: usize) -> Option<Selection> {
        let selection = match self.state.select(index) {
            Ok(selection) => selection,
            Err(reason) => {
                debug!(index, ?reason, "selection ignored");
                return None;
            }
        };

        if selection.started_play {
            let handle = self
                .timers
                .schedule(TimerKind::Tick, self.config.tick_interval_ms);
            self.tick_timer = Some(handle);
            self.push_event(EngineEvent::PlayStarted);
        }

        if let Some(identity) = self.state.board().get(index).cloned() {
            self.push_event(EngineEvent::CardRevealed { index, identity });
        }

        if let Some(attempt) = selection.attempt {
            let handle = self
                .timers
                .schedule(TimerKind::ResolutionPause, self.config.resolution_pause_ms);
            self.pause_timer = Some(handle);

            match attempt {
                PairAttempt::Matched { first, second } => {
                    debug!(first, second, moves = self.state.moves(), "pair matched");
                    self.push_event(EngineEvent::PairMatched { first, second });
                    self.check_completion();
                }
                PairAttempt::Missed { first, second } => {
                    debug!(first, second, moves = self.state.moves(), "pair missed");
                    self.push_event(EngineEvent::PairMissed { first, second });
                }
            }
        }

        Some(selection)
    }

    /// Advance elapsed time by one second. Ignored unless in progress.
    pub fn tick(&mut self) -> bool {
        self.state.tick()
    }

    /// Move the virtual clock forward, firing every timer that comes due.
    ///
    /// Ticks falling inside the window are counted in one step, so the cost
    /// does not grow with `elapsed_ms`. The clock stops at `u64::MAX`.
    pub fn advance_clock(&mut self, elapsed_ms: u64) {
        let until = self.timers.now_ms().saturating_add(elapsed_ms);
        while let Some(fired) = self.timers.pop_due(until) {
            self.on_timer(fired, until);
        }
        self.timers.advance_to(until);
    }

    /// Re-fetch the leaderboard snapshot.
    ///
    /// On failure the previous snapshot is kept.
    pub fn refresh_leaderboard(&mut self) -> Result<&LeaderboardSnapshot, EngineError> {
        match self.store.fetch_top_scores(self.config.leaderboard_size) {
            Ok(records) => {
                self.leaderboard = LeaderboardSnapshot::new(records);
                let len = self.leaderboard.len();
                self.push_event(EngineEvent::LeaderboardRefreshed { len });
                Ok(&self.leaderboard)
            }
            Err(e) => {
                warn!(error = %e, "leaderboard fetch failed, keeping snapshot");
                self.push_event(EngineEvent::LeaderboardUnavailable {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Cancel all pending timers. The current game is left as-is but no
    /// longer changes on its own.
    pub fn shutdown(&mut self) {
        self.cancel_timers();
        debug!("engine shut down");
    }

    // === Internals ===

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
        self.pause_timer = None;
        self.tick_timer = None;
    }

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.len() == Self::EVENT_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn on_timer(&mut self, fired: FiredTimer, until_ms: u64) {
        match fired.kind {
            TimerKind::ResolutionPause => {
                if self.pause_timer != Some(fired.handle) {
                    return;
                }
                self.pause_timer = None;
                self.state.clear_selection();
                self.push_event(EngineEvent::SelectionCleared);
            }
            TimerKind::Tick => {
                if self.tick_timer != Some(fired.handle) {
                    return;
                }
                self.tick_timer = None;

                // Phase only changes on selection, so every tick up to
                // `until_ms` is due as well.
                let interval = self.config.tick_interval_ms;
                let ticks = (until_ms - fired.due_ms) / interval + 1;
                if !self.state.tick_many(ticks) {
                    return;
                }

                // No next tick once its deadline would pass u64::MAX
                let next_delay = interval
                    .checked_mul(ticks)
                    .filter(|&delay| fired.due_ms.checked_add(delay).is_some());
                match next_delay {
                    Some(delay) => {
                        let handle = self.timers.schedule(TimerKind::Tick, delay);
                        self.tick_timer = Some(handle);
                    }
                    None => debug!(elapsed_secs = self.state.elapsed_secs(), "game clock saturated"),
                }
            }
        }
    }

    fn check_completion(&mut self) {
        if !self.state.check_completion() {
            return;
        }

        if let Some(handle) = self.tick_timer.take() {
            self.timers.cancel(handle);
        }

        let (moves, elapsed_secs) = (self.state.moves(), self.state.elapsed_secs());
        info!(moves, elapsed_secs, "game over");
        self.push_event(EngineEvent::GameOver { moves, elapsed_secs });

        self.submit_score();
    }

    fn submit_score(&mut self) {
        if !self.state.claim_submission() {
            return;
        }

        let (moves, elapsed_secs) = (self.state.moves(), self.state.elapsed_secs());
        match self.store.submit_score(&self.player_name, moves, elapsed_secs) {
            Ok(record) => {
                info!(
                    player = %record.player,
                    moves,
                    elapsed_secs,
                    "score submitted"
                );
                self.push_event(EngineEvent::ScoreSubmitted(record));
                let _ = self.refresh_leaderboard();
            }
            Err(e) => {
                warn!(error = %e, "score submission failed");
                self.push_event(EngineEvent::ScoreSubmissionFailed {
                    reason: e.to_string(),
                });
            }
        }
    }
}
