//! Game state: board, selection, matched positions and counters.
//!
//! ## Lifecycle
//!
//! A `GameState` is created when a board is dealt and replaced wholesale
//! when the next game starts. It is plain data plus the selection/match
//! transitions; timers and collaborators live in the engine.
//!
//! ## Phases
//!
//! ```text
//! NotStarted --first valid selection--> InProgress --all matched--> Over
//!      ^                                                              |
//!      +------------------------ new game ----------------------------+
//! ```

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::Board;

/// Phase of one game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Board dealt (or empty), no card selected yet. Clock stopped.
    #[default]
    NotStarted,
    /// At least one card selected. Clock running.
    InProgress,
    /// Every position matched. Clock stopped, score submitted.
    Over,
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectRejection {
    /// Index past the end of the board.
    OutOfBounds,
    /// Two cards already face-up awaiting resolution.
    SelectionFull,
    /// Position already matched.
    AlreadyMatched,
    /// Position already face-up in the current selection.
    AlreadySelected,
}

/// Outcome of a completed two-card attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairAttempt {
    /// Both positions hold the same identity; they are now matched.
    Matched { first: usize, second: usize },
    /// Different identities; they flip back after the pause.
    Missed { first: usize, second: usize },
}

/// Result of an accepted selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Position that was turned face-up.
    pub index: usize,
    /// True if this selection moved the game from NotStarted to InProgress.
    pub started_play: bool,
    /// Set when this selection completed a pair attempt.
    pub attempt: Option<PairAttempt>,
}

/// State of one game.
///
/// Cloning is O(1) for the board and matched set. Deserialized states are
/// checked against the same invariants `select` maintains.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct GameState {
    board: Board,

    /// Face-up positions pending resolution (0, 1 or 2).
    selection: SmallVec<[usize; 2]>,

    /// Permanently revealed positions.
    matched: OrdSet<usize>,

    /// Completed pair attempts.
    moves: u32,

    /// Whole seconds of play.
    elapsed_secs: u64,

    phase: GamePhase,

    /// Latch: the score for this game has been handed to the store.
    score_submitted: bool,
}

/// Serialized form of a game state, checked before it becomes a `GameState`.
#[derive(Deserialize)]
struct StateRecord {
    board: Board,
    selection: Vec<usize>,
    matched: OrdSet<usize>,
    moves: u32,
    elapsed_secs: u64,
    phase: GamePhase,
    score_submitted: bool,
}

impl TryFrom<StateRecord> for GameState {
    type Error = String;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let board = &record.board;

        if record.selection.len() > 2 {
            return Err(format!("{} cards selected", record.selection.len()));
        }
        if let Some(index) = record.selection.iter().find(|&&i| !board.contains_index(i)) {
            return Err(format!("selected position {} is off the board", index));
        }
        if let &[first, second] = record.selection.as_slice() {
            if first == second {
                return Err(format!("position {} selected twice", first));
            }
            // A pending pair is matched exactly when it is a pair
            let first_matched = record.matched.contains(&first);
            if first_matched != record.matched.contains(&second)
                || first_matched != board.is_pair(first, second)
            {
                return Err("selection disagrees with matched positions".into());
            }
        } else if let &[only] = record.selection.as_slice() {
            if record.matched.contains(&only) {
                return Err(format!("position {} is both selected and matched", only));
            }
        }

        for &index in &record.matched {
            let twin_matched = board
                .get(index)
                .map(|identity| board.positions_of(identity))
                .is_some_and(|positions| positions.iter().all(|p| record.matched.contains(p)));
            if !twin_matched {
                return Err(format!("matched position {} has no matched twin", index));
            }
        }
        if (record.moves as usize) < record.matched.len() / 2 {
            return Err(format!(
                "{} moves cannot match {} positions",
                record.moves,
                record.matched.len()
            ));
        }

        let untouched = record.selection.is_empty()
            && record.matched.is_empty()
            && record.moves == 0
            && record.elapsed_secs == 0;
        let complete = !board.is_empty() && record.matched.len() == board.len();
        match record.phase {
            GamePhase::NotStarted if !untouched => return Err("unstarted game has progress".into()),
            GamePhase::Over if !complete => return Err("game over with unmatched cards".into()),
            _ => {}
        }
        if record.score_submitted && record.phase != GamePhase::Over {
            return Err("score submitted before the game is over".into());
        }

        Ok(Self {
            board: record.board,
            selection: record.selection.into_iter().collect(),
            matched: record.matched,
            moves: record.moves,
            elapsed_secs: record.elapsed_secs,
            phase: record.phase,
            score_submitted: record.score_submitted,
        })
    }
}

impl GameState {
    /// Fresh state for a newly dealt board.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Currently selected positions, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Matched positions.
    #[must_use]
    pub fn matched(&self) -> &OrdSet<usize> {
        &self.matched
    }

    #[must_use]
    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.contains(&index)
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Visible to the player: matched or currently selected.
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.is_matched(index) || self.is_selected(index)
    }

    /// Every position matched. An empty board never completes.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.board.is_empty() && self.matched.len() == self.board.len()
    }

    #[must_use]
    pub fn score_submitted(&self) -> bool {
        self.score_submitted
    }

    // === Transitions ===

    /// Turn a card face-up.
    ///
    /// Preconditions are checked in order; the first one violated rejects
    /// the selection and leaves the state untouched.
    pub fn select(&mut self, index: usize) -> Result<Selection, SelectRejection> {
        if !self.board.contains_index(index) {
            return Err(SelectRejection::OutOfBounds);
        }
        if self.selection.len() == 2 {
            return Err(SelectRejection::SelectionFull);
        }
        if self.is_matched(index) {
            return Err(SelectRejection::AlreadyMatched);
        }
        if self.is_selected(index) {
            return Err(SelectRejection::AlreadySelected);
        }

        let started_play = self.phase == GamePhase::NotStarted;
        if started_play {
            self.phase = GamePhase::InProgress;
        }

        self.selection.push(index);

        let attempt = if self.selection.len() == 2 {
            self.moves += 1;
            let (first, second) = (self.selection[0], self.selection[1]);
            if self.board.is_pair(first, second) {
                self.matched.insert(first);
                self.matched.insert(second);
                Some(PairAttempt::Matched { first, second })
            } else {
                Some(PairAttempt::Missed { first, second })
            }
        } else {
            None
        };

        Ok(Selection {
            index,
            started_play,
            attempt,
        })
    }

    /// End of the resolution pause: everything face-down except matches.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Advance elapsed time by one second. Only counts while InProgress.
    pub fn tick(&mut self) -> bool {
        self.tick_many(1)
    }

    /// Advance elapsed time by `ticks` seconds at once, saturating.
    pub fn tick_many(&mut self, ticks: u64) -> bool {
        if self.phase == GamePhase::InProgress {
            self.elapsed_secs = self.elapsed_secs.saturating_add(ticks);
            true
        } else {
            false
        }
    }

    /// Move to Over if the board is complete. Returns true only on the
    /// transition itself, never on later checks.
    pub fn check_completion(&mut self) -> bool {
        if self.phase != GamePhase::Over && self.is_complete() {
            self.phase = GamePhase::Over;
            true
        } else {
            false
        }
    }

    /// Claim the right to submit this game's score. Succeeds once per game,
    /// and only after the game is over.
    pub fn claim_submission(&mut self) -> bool {
        if self.phase == GamePhase::Over && !self.score_submitted {
            self.score_submitted = true;
            true
        } else {
            false
        }
    }
}
