//! Game identifiers and short-code generation.
//!
//! Ids are short codes players type by hand, so the default alphabet drops
//! lowercase letters, vowels, and look-alike characters.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::{GameError, Result};

/// Opaque game identifier. Any string is accepted as a key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub String);

impl GameId {
    /// Create a new game ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Settings for generating game ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameIdConfig {
    /// Characters ids are drawn from.
    pub alphabet: String,

    /// Characters per id.
    pub length: usize,

    /// Ids to try before giving up on collisions.
    pub max_attempts: u32,
}

impl Default for GameIdConfig {
    fn default() -> Self {
        Self {
            alphabet: "6789BCDFGHJKLMNPQRTW".to_string(),
            length: 5,
            max_attempts: 10,
        }
    }
}

impl GameIdConfig {
    /// Set the alphabet (builder pattern).
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Set the id length (builder pattern).
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the collision retry limit (builder pattern).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Check the settings can produce ids.
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(GameError::invalid_input("game id alphabet cannot be empty"));
        }
        if self.length == 0 {
            return Err(GameError::invalid_input("game id length must be at least 1"));
        }
        if self.max_attempts == 0 {
            return Err(GameError::invalid_input("game id max_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Draw one id.
    pub fn generate(&self, rng: &mut GameRng) -> Result<GameId> {
        self.validate()?;
        let chars: Vec<char> = self.alphabet.chars().collect();
        let id: String = (0..self.length)
            .map(|_| chars[rng.gen_range_usize(0..chars.len())])
            .collect();
        Ok(GameId(id))
    }
}
