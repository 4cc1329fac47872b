//! Deck provider returning a caller-supplied set of identities.

use super::DeckProvider;
use crate::core::CardIdentity;
use crate::error::ProviderError;

/// Provider that serves the first `pair_count` entries of a fixed list.
///
/// Can be switched offline to simulate an unreachable source.
#[derive(Clone, Debug)]
pub struct FixedDeck {
    identities: Vec<CardIdentity>,
    available: bool,
    requests: usize,
}

impl FixedDeck {
    /// Create a provider over `identities`.
    pub fn new<I, T>(identities: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CardIdentity>,
    {
        Self {
            identities: identities.into_iter().map(Into::into).collect(),
            available: true,
            requests: 0,
        }
    }

    /// Toggle availability. While offline every request fails.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Number of requests served or refused so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl DeckProvider for FixedDeck {
    fn request_deck(&mut self, pair_count: usize) -> Result<Vec<CardIdentity>, ProviderError> {
        self.requests += 1;
        if !self.available {
            return Err(ProviderError::Unreachable("fixed deck offline".into()));
        }
        if pair_count > self.identities.len() {
            return Err(ProviderError::Malformed(format!(
                "requested {} cards, only {} available",
                pair_count,
                self.identities.len()
            )));
        }
        Ok(self.identities[..pair_count].to_vec())
    }
}
