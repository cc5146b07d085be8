//! Rolling, revealing, and rerolling dice.

use rustc_hash::FxHashSet;

use super::rounds::is_game_over;
use crate::core::{Die, DieId, GameRng, GameState, GameStatus, PlayerId};
use crate::error::{GameError, Result};

/// Roll a die in place. Only this die changes.
pub fn roll_die(die: &mut Die, rng: &mut GameRng) {
    die.value = rng.roll_face();
}

/// Show some of the active player's dice to everyone.
pub fn reveal_dice(state: &GameState, player_id: &PlayerId, die_ids: &[DieId]) -> Result<GameState> {
    check_dice_action(state, player_id, die_ids)?;

    let mut next = state.clone();
    if let Some(player) = next.player_mut(player_id) {
        for &id in die_ids {
            if let Some(die) = player.die_mut(id) {
                die.reveal();
            }
        }
    }
    Ok(next)
}

/// Reroll some of the active player's dice.
///
/// Dice are rerolled by visibility group: selecting any visible die means
/// every visible die must be selected, and the same holds for hidden dice.
/// Rerolled dice take the visibility given by `make_visible`. The turn does
/// not pass.
pub fn reroll_dice(
    state: &GameState,
    player_id: &PlayerId,
    die_ids: &[DieId],
    make_visible: bool,
    rng: &mut GameRng,
) -> Result<GameState> {
    if !state.config.allow_rerolling {
        return Err(GameError::invalid_input("rerolling is disabled"));
    }
    let selected = check_dice_action(state, player_id, die_ids)?;
    let player = state.require_player(player_id)?;

    for visible in [true, false] {
        let group = player.dice.iter().filter(|d| d.is_visible == visible);
        let (chosen, skipped): (Vec<&Die>, Vec<&Die>) =
            group.partition(|d| selected.contains(&d.id));
        if !chosen.is_empty() && !skipped.is_empty() {
            let kind = if visible { "visible" } else { "hidden" };
            return Err(GameError::invalid_input(format!(
                "all {kind} dice must be rerolled together"
            )));
        }
    }

    let mut next = state.clone();
    if let Some(player) = next.player_mut(player_id) {
        for die in player.dice.iter_mut().filter(|d| selected.contains(&d.id)) {
            roll_die(die, rng);
            die.is_visible = make_visible;
        }
    }
    Ok(next)
}

/// Common checks for dice actions; returns the selected ids as a set.
fn check_dice_action(
    state: &GameState,
    player_id: &PlayerId,
    die_ids: &[DieId],
) -> Result<FxHashSet<DieId>> {
    if is_game_over(state) {
        return Err(GameError::invalid_state("the game is over"));
    }
    if state.status != GameStatus::AwaitingBid {
        return Err(GameError::invalid_state(format!(
            "dice can only be changed during a round, game is {}",
            state.status
        )));
    }
    if *player_id != state.active_player_id {
        return Err(GameError::invalid_input(format!(
            "it is {}'s turn, not {player_id}'s",
            state.active_player_id
        )));
    }
    if die_ids.is_empty() {
        return Err(GameError::invalid_input("no dice selected"));
    }

    let player = state.require_player(player_id)?;
    let mut selected = FxHashSet::default();
    for &id in die_ids {
        if !player.owns(id) {
            return Err(GameError::invalid_input(format!("{player_id} does not own {id}")));
        }
        if !selected.insert(id) {
            return Err(GameError::invalid_input(format!("{id} selected twice")));
        }
    }
    Ok(selected)
}
