//! Error type shared by the rules engine and the game store.
//!
//! Failures fall into three kinds:
//!
//! - `NotFound`: the store has no game under the requested identifier. This is
//!   the only failure expected during normal play (a client holding a stale
//!   game id) and should be shown to the user as a recoverable message.
//! - `InvalidState`: the game, round, or call preconditions of an operation are
//!   not met (calling before any bid, a call already pending, an inconsistent
//!   bidding queue).
//! - `InvalidInput`: the request itself breaks a rule (non-positive quantity,
//!   bidding out of turn, a bid that does not raise the active bid).
//!
//! `InvalidState` and `InvalidInput` point at a caller that failed to enforce
//! the protocol. They are never retried by the engine.

use thiserror::Error;

use crate::store::GameId;

/// Errors produced by engine and store operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// No game is registered under the identifier.
    #[error("game not found: \"{0}\"")]
    NotFound(GameId),

    /// Operation attempted while its preconditions are unmet.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Operation rejected because its arguments break a game rule.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every generated game id collided with an existing game.
    #[error("failed to create a unique game id after {attempts} attempts")]
    IdSpaceExhausted {
        /// Number of ids generated before giving up.
        attempts: u32,
    },
}

impl GameError {
    /// Build an `InvalidState` error.
    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }

    /// Build an `InvalidInput` error.
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidInput(detail.into())
    }

    /// Whether the error is part of normal operation rather than a caller defect.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
