//! Bids and their ordering.
//!
//! A bid claims "at least `quantity` dice showing `value`" across every
//! player's dice. Bids are totally ordered by `(quantity, value)`: a later bid
//! must raise the quantity, or keep the quantity and raise the face value.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A recorded bid. Immutable once stored in the bid history.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    /// The player who made the bid.
    pub player_id: PlayerId,

    /// Claimed number of dice.
    pub quantity: u32,

    /// Claimed face value.
    pub value: u8,
}

impl Bid {
    /// Create a new bid.
    pub fn new(player_id: impl Into<PlayerId>, quantity: u32, value: u8) -> Self {
        Self {
            player_id: player_id.into(),
            quantity,
            value,
        }
    }

    /// Check if this bid strictly outranks `previous`.
    ///
    /// ```
    /// use liars_dice::core::Bid;
    ///
    /// let active = Bid::new("a", 3, 4);
    /// assert!(Bid::new("b", 4, 1).outranks(&active));
    /// assert!(Bid::new("b", 3, 5).outranks(&active));
    /// assert!(!Bid::new("b", 3, 4).outranks(&active));
    /// assert!(!Bid::new("b", 2, 6).outranks(&active));
    /// ```
    #[must_use]
    pub fn outranks(&self, previous: &Bid) -> bool {
        self.quantity > previous.quantity
            || (self.quantity == previous.quantity && self.value > previous.value)
    }
}
