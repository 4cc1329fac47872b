//! Card identity.
//!
//! A `CardIdentity` stands for one card face. The engine only compares
//! identities for equality; what the string means (an image URL, a
//! glyph, a theme key) is up to the deck provider and the renderer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque, comparable token for one card face.
///
/// Backed by `Arc<str>` so duplicating a deck onto the board is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardIdentity(Arc<str>);

impl CardIdentity {
    /// Create a new identity.
    #[must_use]
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    /// The underlying token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the token is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for CardIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardIdentity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
