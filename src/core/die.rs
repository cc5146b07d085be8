//! Dice: identity, face value, and visibility.
//!
//! A die belongs to exactly one player while it is in play. Its face value is
//! changed only by rolling, and its visibility only by revealing or rerolling.

use serde::{Deserialize, Serialize};

/// Lowest face on a die.
pub const MIN_FACE: u8 = 1;

/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// Opaque die identifier, unique within a game.
///
/// Allocated by [`GameState::alloc_die_id`](crate::core::GameState::alloc_die_id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DieId(pub u32);

impl DieId {
    /// Create a new die ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Die({})", self.0)
    }
}

/// Check that a face value is in `1..=6`.
#[must_use]
pub const fn is_valid_face(value: u8) -> bool {
    value >= MIN_FACE && value <= MAX_FACE
}

/// A single die.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    /// Identity within the game.
    pub id: DieId,

    /// Face value, `1..=6`.
    pub value: u8,

    /// Whether the die has been revealed to the other players.
    pub is_visible: bool,
}

impl Die {
    /// Create a hidden die showing `value`.
    #[must_use]
    pub fn new(id: DieId, value: u8) -> Self {
        debug_assert!(is_valid_face(value), "face value out of range: {value}");
        Self {
            id,
            value,
            is_visible: false,
        }
    }

    /// Reveal the die to all players.
    pub fn reveal(&mut self) {
        self.is_visible = true;
    }

    /// Hide the die from the other players.
    pub fn hide(&mut self) {
        self.is_visible = false;
    }
}
