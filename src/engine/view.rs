//! Read model for renderers.

use serde::{Deserialize, Serialize};

use crate::core::{CardIdentity, GamePhase, GameState};
use crate::leaderboard::LeaderboardSnapshot;

/// What the player sees at one position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    /// Face-down.
    Hidden,
    /// Face-up pending resolution.
    Selected(CardIdentity),
    /// Permanently revealed.
    Matched(CardIdentity),
}

impl CardFace {
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        !matches!(self, CardFace::Hidden)
    }

    /// Identity shown, if face-up.
    #[must_use]
    pub fn identity(&self) -> Option<&CardIdentity> {
        match self {
            CardFace::Hidden => None,
            CardFace::Selected(id) | CardFace::Matched(id) => Some(id),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: GamePhase,
    pub moves: u32,
    pub elapsed_secs: u64,
    /// One entry per board position. Hidden cards do not leak identities.
    pub cards: Vec<CardFace>,
    pub leaderboard: LeaderboardSnapshot,
}

impl GameView {
    /// Build a view of `state`.
    #[must_use]
    pub fn new(state: &GameState, leaderboard: &LeaderboardSnapshot) -> Self {
        let cards = state
            .board()
            .iter()
            .enumerate()
            .map(|(index, identity)| {
                if state.is_matched(index) {
                    CardFace::Matched(identity.clone())
                } else if state.is_selected(index) {
                    CardFace::Selected(identity.clone())
                } else {
                    CardFace::Hidden
                }
            })
            .collect();

        Self {
            phase: state.phase(),
            moves: state.moves(),
            elapsed_secs: state.elapsed_secs(),
            cards,
            leaderboard: leaderboard.clone(),
        }
    }

    /// Per-position flip state (matched or selected).
    #[must_use]
    pub fn flipped(&self) -> Vec<bool> {
        self.cards.iter().map(CardFace::is_face_up).collect()
    }

    /// True if nothing has been dealt yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
