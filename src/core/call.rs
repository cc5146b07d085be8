//! Calls: the actions that end a round.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// The kind of call made against the active bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallKind {
    /// Dispute the active bid: the caller claims the pool holds fewer dice.
    ChallengeBid,
    /// Claim the active bid is exactly right.
    SpotOn,
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallKind::ChallengeBid => f.write_str("CHALLENGE_BID"),
            CallKind::SpotOn => f.write_str("SPOT_ON"),
        }
    }
}

/// Change to one player's die count caused by a resolved call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEffect {
    /// The player whose dice change.
    pub player_id: PlayerId,

    /// `-1`, `0`, or `+1`.
    pub num_dice_delta: i8,
}

impl CallEffect {
    /// The player loses one die.
    pub fn lose_die(player_id: PlayerId) -> Self {
        Self {
            player_id,
            num_dice_delta: -1,
        }
    }

    /// The player gains one die.
    pub fn gain_die(player_id: PlayerId) -> Self {
        Self {
            player_id,
            num_dice_delta: 1,
        }
    }
}

/// A call and, once resolved, its outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Challenge or spot-on.
    pub kind: CallKind,

    /// The player who made the call.
    pub player_id: PlayerId,

    /// `None` until resolved.
    pub is_correct: Option<bool>,

    /// Die-count change to apply when the next round starts.
    pub effect: CallEffect,
}

impl Call {
    /// Check if the call has been resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.is_correct.is_some()
    }
}
