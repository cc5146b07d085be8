//! Game configuration.
//!
//! A game starts with the classic ruleset. The host may change it in the
//! lobby or between rounds; the engine reads it on every rules decision.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Most dice a player may be dealt at the start of a game.
pub const MAX_DICE_PER_PLAYER: u32 = 20;

/// Ruleset toggles for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Players may reroll some of their dice during their turn.
    pub allow_rerolling: bool,

    /// Players may make spot-on calls.
    pub allow_spot_on_calls: bool,

    /// Every player can see how many dice the others hold.
    pub show_num_dice: bool,

    /// Turn time limit in milliseconds. `None` disables the turn timer.
    pub turn_time_limit: Option<u64>,

    /// Hide the bid log (everything but the active bid) during a round.
    pub hide_logs_during_round: bool,

    /// Dice showing 1 count toward any bid on another face value.
    pub count_ones_as_wild: bool,

    /// Dice dealt to each player when a game starts.
    pub num_dice_per_player: u32,
}

impl GameConfig {
    /// The classic ruleset: spot-on calls, no rerolls, five dice each.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            allow_rerolling: false,
            allow_spot_on_calls: true,
            show_num_dice: true,
            turn_time_limit: None,
            hide_logs_during_round: true,
            count_ones_as_wild: false,
            num_dice_per_player: 5,
        }
    }

    /// Classic plus rerolling.
    #[must_use]
    pub fn advanced() -> Self {
        Self {
            allow_rerolling: true,
            ..Self::classic()
        }
    }

    /// Look up a preset by name (`"classic"` or `"advanced"`).
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "advanced" => Some(Self::advanced()),
            _ => None,
        }
    }

    /// Set rerolling (builder pattern).
    #[must_use]
    pub fn with_rerolling(mut self, allow: bool) -> Self {
        self.allow_rerolling = allow;
        self
    }

    /// Set spot-on calls (builder pattern).
    #[must_use]
    pub fn with_spot_on_calls(mut self, allow: bool) -> Self {
        self.allow_spot_on_calls = allow;
        self
    }

    /// Set die count visibility (builder pattern).
    #[must_use]
    pub fn with_show_num_dice(mut self, show: bool) -> Self {
        self.show_num_dice = show;
        self
    }

    /// Set the turn time limit in milliseconds (builder pattern).
    #[must_use]
    pub fn with_turn_time_limit(mut self, limit_ms: Option<u64>) -> Self {
        self.turn_time_limit = limit_ms;
        self
    }

    /// Set bid log hiding (builder pattern).
    #[must_use]
    pub fn with_hidden_logs(mut self, hide: bool) -> Self {
        self.hide_logs_during_round = hide;
        self
    }

    /// Set wild ones (builder pattern).
    #[must_use]
    pub fn with_wild_ones(mut self, wild: bool) -> Self {
        self.count_ones_as_wild = wild;
        self
    }

    /// Set the starting dice per player (builder pattern).
    #[must_use]
    pub fn with_dice_per_player(mut self, count: u32) -> Self {
        self.num_dice_per_player = count;
        self
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<()> {
        if self.num_dice_per_player == 0 {
            return Err(GameError::invalid_input(
                "num_dice_per_player must be at least 1",
            ));
        }
        if self.num_dice_per_player > MAX_DICE_PER_PLAYER {
            return Err(GameError::invalid_input(format!(
                "num_dice_per_player must be at most {MAX_DICE_PER_PLAYER}, got {}",
                self.num_dice_per_player
            )));
        }
        if self.turn_time_limit == Some(0) {
            return Err(GameError::invalid_input("turn_time_limit must be positive"));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
