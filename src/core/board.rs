//! The board: 2N card identities laid out in a shuffled order.
//!
//! ## Invariants
//!
//! - Every identity appears exactly twice.
//! - Length is even and fixed for the lifetime of one game.
//!
//! `Board::deal` checks the deck before duplicating it. Deserialization
//! goes through `check_layout`, so a `Board` value always holds both
//! invariants whichever way it was built.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::card::CardIdentity;
use super::rng::{permute, RandomSource};
use crate::error::ProviderError;

/// Ordered sequence of card identities, indexed by position.
///
/// Uses an `im::Vector` so game state snapshots clone in O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardLayout")]
pub struct Board {
    cards: Vector<CardIdentity>,
}

/// Serialized form of a board, checked before it becomes a `Board`.
#[derive(Deserialize)]
struct BoardLayout {
    cards: Vec<CardIdentity>,
}

impl TryFrom<BoardLayout> for Board {
    type Error = String;

    fn try_from(layout: BoardLayout) -> Result<Self, Self::Error> {
        check_layout(&layout.cards)?;
        Ok(Self {
            cards: layout.cards.into_iter().collect(),
        })
    }
}

impl Board {
    /// An empty board. Never completes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a board from `identities`: duplicate them and permute the result.
    ///
    /// The deck must hold `pair_count` distinct, non-blank identities;
    /// anything else is reported as a malformed deck.
    pub fn deal<R: RandomSource + ?Sized>(
        identities: &[CardIdentity],
        pair_count: usize,
        rng: &mut R,
    ) -> Result<Self, ProviderError> {
        validate_deck(identities, pair_count)?;

        let mut cards: Vec<CardIdentity> = Vec::with_capacity(identities.len() * 2);
        cards.extend_from_slice(identities);
        cards.extend_from_slice(identities);
        permute(&mut cards, rng);

        Ok(Self {
            cards: cards.into_iter().collect(),
        })
    }

    /// Number of positions (2N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if no game has been dealt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Identity at `index`, if in bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CardIdentity> {
        self.cards.get(index)
    }

    /// True if `index` is a valid position.
    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.cards.len()
    }

    /// True if both positions are in bounds and hold the same identity.
    #[must_use]
    pub fn is_pair(&self, first: usize, second: usize) -> bool {
        match (self.get(first), self.get(second)) {
            (Some(a), Some(b)) => first != second && a == b,
            _ => false,
        }
    }

    /// Iterate over identities in position order.
    pub fn iter(&self) -> impl Iterator<Item = &CardIdentity> {
        self.cards.iter()
    }

    /// The two positions holding `identity`, in ascending order.
    #[must_use]
    pub fn positions_of(&self, identity: &CardIdentity) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, c)| *c == identity)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Check that a deck response is usable: exact count, unique, non-blank.
pub fn validate_deck(identities: &[CardIdentity], pair_count: usize) -> Result<(), ProviderError> {
    if identities.len() != pair_count {
        return Err(ProviderError::Malformed(format!(
            "expected {} cards, got {}",
            pair_count,
            identities.len()
        )));
    }

    let mut seen = FxHashSet::default();
    for identity in identities {
        if identity.is_blank() {
            return Err(ProviderError::Malformed("blank card identity".into()));
        }
        if !seen.insert(identity) {
            return Err(ProviderError::Malformed(format!(
                "duplicate card identity {}",
                identity
            )));
        }
    }

    Ok(())
}

/// Check a laid-out board: every identity non-blank and present exactly twice.
fn check_layout(cards: &[CardIdentity]) -> Result<(), String> {
    if cards.len() % 2 != 0 {
        return Err(format!("board length {} is odd", cards.len()));
    }

    let mut counts: FxHashMap<&CardIdentity, usize> = FxHashMap::default();
    for card in cards {
        if card.is_blank() {
            return Err("blank card identity".into());
        }
        *counts.entry(card).or_insert(0) += 1;
    }
    match counts.iter().find(|(_, count)| **count != 2) {
        Some((card, count)) => Err(format!("card identity {} appears {} times", card, count)),
        None => Ok(()),
    }
}
