//! Bid validation and recording.

use super::rounds::{is_game_over, next_active_player, turn_timer};
use crate::core::{die::is_valid_face, Bid, GameState, GameStatus};
use crate::error::{GameError, Result};

/// Check a bid against the active bid, reporting the rule it breaks.
///
/// A bid is valid when its quantity is at least 1, it comes from the active
/// player, and either no bid has been made this round or it outranks the
/// active bid (higher quantity, or same quantity and higher face value).
pub fn validate_bid(state: &GameState, bid: &Bid) -> Result<()> {
    if bid.quantity == 0 {
        return Err(GameError::invalid_input("bid quantity must be at least 1"));
    }
    if !is_valid_face(bid.value) {
        return Err(GameError::invalid_input(format!(
            "bid face value must be between 1 and 6, got {}",
            bid.value
        )));
    }
    if bid.player_id != state.active_player_id {
        return Err(GameError::invalid_input(format!(
            "it is {}'s turn, not {}'s",
            state.active_player_id, bid.player_id
        )));
    }

    match state.active_bid() {
        None => Ok(()),
        Some(active) if bid.outranks(active) => Ok(()),
        Some(active) => Err(GameError::invalid_input(format!(
            "bid of {}x{} does not raise the active bid of {}x{}",
            bid.quantity, bid.value, active.quantity, active.value
        ))),
    }
}

/// Check whether `bid` may be placed next.
///
/// ```
/// use liars_dice::core::{Bid, Player};
/// use liars_dice::rules;
///
/// let state = rules::initial_state(Player::new("ann", "Ann", "🦊"));
/// assert!(rules::is_valid_next_bid(&state, &Bid::new("ann", 1, 6)));
/// assert!(!rules::is_valid_next_bid(&state, &Bid::new("ann", 0, 6)));
/// assert!(!rules::is_valid_next_bid(&state, &Bid::new("bob", 1, 6)));
/// ```
#[must_use]
pub fn is_valid_next_bid(state: &GameState, bid: &Bid) -> bool {
    validate_bid(state, bid).is_ok()
}

/// Record a bid and pass the turn to the next player in the bidding queue.
pub fn apply_bid(state: &GameState, bid: Bid, now_ms: u64) -> Result<GameState> {
    if is_game_over(state) {
        return Err(GameError::invalid_state("the game is over"));
    }
    if state.status != GameStatus::AwaitingBid {
        return Err(GameError::invalid_state(format!(
            "bids are only accepted while awaiting a bid, game is {}",
            state.status
        )));
    }
    validate_bid(state, &bid)?;
    let next_player = next_active_player(state)?;

    let mut next = state.clone();
    next.previous_bids.push_back(bid);
    next.active_player_id = next_player;
    next.timer_start_time = turn_timer(&next.config, now_ms);
    Ok(next)
}
