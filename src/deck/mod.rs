//! Deck providers.
//!
//! A deck provider hands the engine `pair_count` unique card identities for
//! a new game. The engine validates every response, so a provider only
//! needs to report transport failures itself.
//!
//! ## Providers
//!
//! - [`StandardDeck`]: draws from a shuffled 52-card deck and yields card
//!   image URLs.
//! - [`FixedDeck`]: returns a caller-supplied list (themes, tests).

pub mod fixed;
pub mod standard;

pub use fixed::FixedDeck;
pub use standard::{StandardCard, StandardDeck, Suit, CARD_IMAGE_BASE};

use crate::core::CardIdentity;
use crate::error::ProviderError;

/// Source of card identities for new games.
pub trait DeckProvider {
    /// Request `pair_count` unique card identities.
    fn request_deck(&mut self, pair_count: usize) -> Result<Vec<CardIdentity>, ProviderError>;
}

impl<T: DeckProvider + ?Sized> DeckProvider for Box<T> {
    fn request_deck(&mut self, pair_count: usize) -> Result<Vec<CardIdentity>, ProviderError> {
        (**self).request_deck(pair_count)
    }
}

impl<T: DeckProvider + ?Sized> DeckProvider for &mut T {
    fn request_deck(&mut self, pair_count: usize) -> Result<Vec<CardIdentity>, ProviderError> {
        (**self).request_deck(pair_count)
    }
}
