//! Standard 52-card deck provider.
//!
//! Mirrors the public deck-of-cards image set: each card is identified by
//! a two-character code (value then suit) and its image lives at
//! `{CARD_IMAGE_BASE}/{code}.png`. Tens use `0` as their value code.

use serde::{Deserialize, Serialize};

use super::DeckProvider;
use crate::core::{CardIdentity, GameRng};
use crate::error::ProviderError;

/// Base URL of the card image set.
pub const CARD_IMAGE_BASE: &str = "https://deckofcardsapi.com/static/img";

/// Value codes in rank order, ace low.
const VALUE_CODES: [char; 13] = ['A', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'J', 'Q', 'K'];

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Diamonds,
    Clubs,
    Hearts,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts];

    /// Single-letter code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
        }
    }
}

/// One card of a standard deck.
///
/// The rank is always in `1..=13`; `new` and deserialization both check it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardFields")]
pub struct StandardCard {
    rank: u8,
    suit: Suit,
}

#[derive(Deserialize)]
struct CardFields {
    rank: u8,
    suit: Suit,
}

impl TryFrom<CardFields> for StandardCard {
    type Error = String;

    fn try_from(fields: CardFields) -> Result<Self, Self::Error> {
        Self::new(fields.rank, fields.suit)
            .ok_or_else(|| format!("rank {} outside 1..=13", fields.rank))
    }
}

impl StandardCard {
    /// Card of `rank` (1 for ace up to 13 for king). `None` for any other rank.
    #[must_use]
    pub fn new(rank: u8, suit: Suit) -> Option<Self> {
        (1..=13).contains(&rank).then_some(Self { rank, suit })
    }

    #[must_use]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Two-character code, e.g. `AS`, `0H`, `KD`.
    #[must_use]
    pub fn code(&self) -> String {
        let value = VALUE_CODES[usize::from(self.rank) - 1];
        format!("{}{}", value, self.suit.code())
    }

    /// Image URL used as this card's identity.
    #[must_use]
    pub fn image_url(&self) -> String {
        format!("{}/{}.png", CARD_IMAGE_BASE, self.code())
    }

    /// All 52 cards in suit-major order.
    #[must_use]
    pub fn full_deck() -> Vec<StandardCard> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| (1..=13u8).map(move |rank| StandardCard { rank, suit }))
            .collect()
    }
}

/// Deck provider backed by a local shuffled 52-card deck.
///
/// Every request opens a fresh deck, shuffles it and draws from the top.
#[derive(Clone, Debug)]
pub struct StandardDeck {
    rng: GameRng,
}

impl StandardDeck {
    /// Number of cards in a standard deck.
    pub const SIZE: usize = 52;

    /// Create a provider with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Create a provider seeded from entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
        }
    }

    /// Shuffle a fresh deck and draw `count` cards.
    pub fn draw(&mut self, count: usize) -> Result<Vec<StandardCard>, ProviderError> {
        if count > Self::SIZE {
            return Err(ProviderError::Malformed(format!(
                "cannot draw {} cards from a {}-card deck",
                count,
                Self::SIZE
            )));
        }

        let mut deck = StandardCard::full_deck();
        self.rng.shuffle(&mut deck);
        deck.truncate(count);
        Ok(deck)
    }
}

impl DeckProvider for StandardDeck {
    fn request_deck(&mut self, pair_count: usize) -> Result<Vec<CardIdentity>, ProviderError> {
        let cards = self.draw(pair_count)?;
        Ok(cards
            .iter()
            .map(|card| CardIdentity::from(card.image_url()))
            .collect())
    }
}
