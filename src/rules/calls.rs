//! Call resolution.
//!
//! A call ends the round. The dice of every player are counted against the
//! active bid and the outcome decides whose die count changes:
//!
//! | Call | Correct when | Correct effect | Incorrect effect |
//! |------|--------------|----------------|------------------|
//! | `ChallengeBid` | count < quantity | bidder -1 | caller -1 |
//! | `SpotOn` | count == quantity | caller +1 | caller -1 |
//!
//! The effect is recorded on the call; dice are only added or removed when
//! the next round starts.

use super::rounds::is_game_over;
use crate::core::{Call, CallEffect, CallKind, GameState, GameStatus};
use crate::error::{GameError, Result};

/// Count the dice across all players that count toward `value`.
///
/// With `count_ones_as_wild`, dice showing 1 also count toward any other
/// value. A bid on ones counts ones only.
#[must_use]
pub fn count_dice_with_value(state: &GameState, value: u8) -> usize {
    let ones_wild = state.config.count_ones_as_wild && value != 1;
    state
        .player_map
        .values()
        .map(|player| {
            let wild = if ones_wild { player.count_value(1) } else { 0 };
            player.count_value(value) + wild
        })
        .sum()
}

/// Decide whether a call against the active bid would be correct.
pub fn is_call_correct(state: &GameState, kind: CallKind) -> Result<bool> {
    let bid = state
        .active_bid()
        .ok_or_else(|| GameError::invalid_state("no bid has been made this round"))?;
    let count = count_dice_with_value(state, bid.value);
    let quantity = bid.quantity as usize;

    Ok(match kind {
        CallKind::ChallengeBid => count < quantity,
        CallKind::SpotOn => count == quantity,
    })
}

/// Resolve a call made by the active player against the active bid.
///
/// Records the resolved call in `active_call` and ends the round.
pub fn resolve_call(state: &GameState, kind: CallKind) -> Result<GameState> {
    if is_game_over(state) {
        return Err(GameError::invalid_state("the game is over"));
    }
    if state.status != GameStatus::AwaitingBid {
        return Err(GameError::invalid_state(format!(
            "calls are only accepted while awaiting a bid, game is {}",
            state.status
        )));
    }
    if state.active_call.is_some() {
        return Err(GameError::invalid_state("a call is already pending"));
    }
    if state.bidding_queue.len() < 2 {
        return Err(GameError::invalid_state(
            "a call needs at least two players in the bidding queue",
        ));
    }
    let bid = state
        .active_bid()
        .ok_or_else(|| GameError::invalid_state("no bid has been made this round"))?;
    if kind == CallKind::SpotOn && !state.config.allow_spot_on_calls {
        return Err(GameError::invalid_input("spot-on calls are disabled"));
    }

    let caller = state.active_player_id.clone();
    if caller == bid.player_id {
        return Err(GameError::invalid_state(format!(
            "{caller} cannot call their own bid"
        )));
    }

    let is_correct = is_call_correct(state, kind)?;
    let effect = match (kind, is_correct) {
        (CallKind::ChallengeBid, true) => CallEffect::lose_die(bid.player_id.clone()),
        (CallKind::ChallengeBid, false) => CallEffect::lose_die(caller.clone()),
        (CallKind::SpotOn, true) => CallEffect::gain_die(caller.clone()),
        (CallKind::SpotOn, false) => CallEffect::lose_die(caller.clone()),
    };

    let mut next = state.clone();
    next.active_call = Some(Call {
        kind,
        player_id: caller,
        is_correct: Some(is_correct),
        effect,
    });
    debug_assert!(state.status.can_transition_to(GameStatus::RoundOver));
    next.status = GameStatus::RoundOver;
    next.timer_start_time = None;
    Ok(next)
}
