//! Turn rotation, round advancement, and game-over detection.

use super::dice::roll_die;
use super::lobby::MIN_PLAYERS;
use crate::core::{CallEffect, Die, GameConfig, GameRng, GameState, GameStatus, PlayerId};
use crate::error::{GameError, Result};

/// Timer start for a new turn, if the config has a turn limit.
pub(crate) fn turn_timer(config: &GameConfig, now_ms: u64) -> Option<u64> {
    config.turn_time_limit.map(|_| now_ms)
}

/// The player who acts after the active player.
///
/// Rotation walks the bidding queue, wrapping at the end. Eliminated players
/// are already gone from the queue, so no skipping is needed.
pub fn next_active_player(state: &GameState) -> Result<PlayerId> {
    if state.bidding_queue.is_empty() {
        return Err(GameError::invalid_state("game state contains an empty bidding queue"));
    }
    let index = state
        .bidding_queue
        .iter()
        .position(|id| *id == state.active_player_id)
        .ok_or_else(|| {
            GameError::invalid_state(format!(
                "active player {} is not in the bidding queue",
                state.active_player_id
            ))
        })?;

    let next = (index + 1) % state.bidding_queue.len();
    Ok(state.bidding_queue[next].clone())
}

/// Check if the game has ended.
///
/// A game is over once at most one player is left in the bidding queue, which
/// holds exactly the players with dice. A lobby is never over.
#[must_use]
pub fn is_game_over(state: &GameState) -> bool {
    match state.status {
        GameStatus::GameOver => true,
        GameStatus::InLobby => false,
        GameStatus::AwaitingBid | GameStatus::RoundOver => state.bidding_queue.len() <= 1,
    }
}

/// The last player holding dice, once the game is over.
#[must_use]
pub fn winner(state: &GameState) -> Option<PlayerId> {
    if !is_game_over(state) {
        return None;
    }
    match state.bidding_queue.as_slice() {
        [sole] => Some(sole.clone()),
        _ => None,
    }
}

/// Check whether the active player has run out of time.
#[must_use]
pub fn is_turn_expired(state: &GameState, now_ms: u64) -> bool {
    match (state.config.turn_time_limit, state.timer_start_time) {
        (Some(limit), Some(start)) => now_ms.saturating_sub(start) >= limit,
        _ => false,
    }
}

/// Start the next round.
///
/// From the lobby this deals `num_dice_per_player` dice to every seated
/// player and the host opens the bidding.
///
/// After a call this applies the call's effect: a die is taken from or given
/// to the affected player, and a player left without dice leaves the bidding
/// queue. If one player remains the game is over. Otherwise the affected
/// player opens the next round (or, if eliminated, the next player after
/// them), every die is rerolled hidden, and the bid history is cleared.
pub fn start_round(state: &GameState, rng: &mut GameRng, now_ms: u64) -> Result<GameState> {
    let next = match state.status {
        GameStatus::InLobby => start_first_round(state, rng, now_ms)?,
        GameStatus::RoundOver => advance_round(state, rng, now_ms)?,
        status => {
            return Err(GameError::invalid_state(format!(
                "a round can only start from the lobby or after a call, game is {status}"
            )))
        }
    };
    debug_assert!(state.status.can_transition_to(next.status));
    Ok(next)
}

fn start_first_round(state: &GameState, rng: &mut GameRng, now_ms: u64) -> Result<GameState> {
    if state.player_count() < MIN_PLAYERS {
        return Err(GameError::invalid_state(format!(
            "at least {MIN_PLAYERS} players are needed to start"
        )));
    }
    state.config.validate()?;

    let mut next = state.clone();
    let seats: Vec<PlayerId> = next.seats.iter().cloned().collect();
    for id in &seats {
        let mut dice = Vec::with_capacity(next.config.num_dice_per_player as usize);
        for _ in 0..next.config.num_dice_per_player {
            dice.push(Die::new(next.alloc_die_id()?, rng.roll_face()));
        }
        let player = next
            .player_mut(id)
            .ok_or_else(|| GameError::invalid_state(format!("seated player {id} missing")))?;
        player.dice = dice.into_iter().collect();
    }

    next.bidding_queue = seats;
    next.active_player_id = next.host_player_id.clone();
    next.previous_bids.clear();
    next.active_call = None;
    next.status = GameStatus::AwaitingBid;
    next.timer_start_time = turn_timer(&next.config, now_ms);
    Ok(next)
}

fn advance_round(state: &GameState, rng: &mut GameRng, now_ms: u64) -> Result<GameState> {
    let call = state
        .active_call
        .as_ref()
        .ok_or_else(|| GameError::invalid_state("round over without a resolved call"))?;
    let target = call.effect.player_id.clone();
    let target_index = state
        .bidding_queue
        .iter()
        .position(|id| *id == target)
        .ok_or_else(|| {
            GameError::invalid_state(format!("call affects {target}, who is not in the bidding queue"))
        })?;

    let mut next = state.clone();
    next.active_call = None;
    apply_effect(&mut next, &call.effect, rng)?;

    let eliminated = next.require_player(&target)?.is_eliminated();
    if eliminated {
        next.bidding_queue.remove(target_index);
    }

    if next.bidding_queue.len() <= 1 {
        let survivor = next
            .bidding_queue
            .first()
            .cloned()
            .ok_or_else(|| GameError::invalid_state("every player was eliminated"))?;
        next.active_player_id = survivor;
        next.status = GameStatus::GameOver;
        next.timer_start_time = None;
        return Ok(next);
    }

    next.active_player_id = if eliminated {
        next.bidding_queue[target_index % next.bidding_queue.len()].clone()
    } else {
        target
    };

    for id in &next.bidding_queue.clone() {
        if let Some(player) = next.player_mut(id) {
            for die in player.dice.iter_mut() {
                roll_die(die, rng);
                die.hide();
            }
        }
    }

    next.previous_bids.clear();
    next.status = GameStatus::AwaitingBid;
    next.timer_start_time = turn_timer(&next.config, now_ms);
    Ok(next)
}

/// Add or remove a die according to a resolved call.
fn apply_effect(state: &mut GameState, effect: &CallEffect, rng: &mut GameRng) -> Result<()> {
    match effect.num_dice_delta {
        0 => Ok(()),
        -1 => {
            let player = state.player_mut(&effect.player_id).ok_or_else(|| {
                GameError::invalid_state(format!("player {} is not in the game", effect.player_id))
            })?;
            player.dice.pop().map(|_| ()).ok_or_else(|| {
                GameError::invalid_state(format!("player {} has no die to lose", effect.player_id))
            })
        }
        1 => {
            let die = Die::new(state.alloc_die_id()?, rng.roll_face());
            let player = state.player_mut(&effect.player_id).ok_or_else(|| {
                GameError::invalid_state(format!("player {} is not in the game", effect.player_id))
            })?;
            player.dice.push(die);
            Ok(())
        }
        delta => Err(GameError::invalid_state(format!(
            "die count delta must be -1, 0 or 1, got {delta}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bid, Call, CallKind, Player};
    use crate::rules::{add_player, initial_state};

    fn lobby(ids: &[&str]) -> GameState {
        let mut state = initial_state(Player::new(ids[0], ids[0], "🙂"));
        for id in &ids[1..] {
            state = add_player(&state, Player::new(*id, *id, "🙂")).unwrap();
        }
        state
    }

    fn round_over(state: &GameState, effect: CallEffect) -> GameState {
        let mut state = state.clone();
        state.status = GameStatus::RoundOver;
        state.active_call = Some(Call {
            kind: CallKind::ChallengeBid,
            player_id: effect.player_id.clone(),
            is_correct: Some(false),
            effect,
        });
        state
    }

    #[test]
    fn test_next_active_player_wraps() {
        let mut state = lobby(&["a", "b", "c"]);
        assert_eq!(next_active_player(&state), Ok(PlayerId::new("b")));

        state.active_player_id = PlayerId::new("c");
        assert_eq!(next_active_player(&state), Ok(PlayerId::new("a")));
    }

    #[test]
    fn test_next_active_player_errors() {
        let mut state = lobby(&["a", "b"]);
        state.active_player_id = PlayerId::new("zed");
        assert!(matches!(next_active_player(&state), Err(GameError::InvalidState(_))));

        state.bidding_queue.clear();
        assert!(matches!(next_active_player(&state), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_start_first_round_deals_dice() {
        let mut rng = GameRng::new(1);
        let state = start_round(&lobby(&["a", "b", "c"]), &mut rng, 0).unwrap();

        assert_eq!(state.status, GameStatus::AwaitingBid);
        assert_eq!(state.active_player_id, PlayerId::new("a"));
        assert_eq!(state.total_dice(), 15);
        for player in state.player_map.values() {
            assert_eq!(player.num_dice(), 5);
            assert!(player.dice.iter().all(|d| !d.is_visible));
        }
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_start_first_round_die_ids_unique() {
        let mut rng = GameRng::new(1);
        let state = start_round(&lobby(&["a", "b"]), &mut rng, 0).unwrap();

        let mut ids: Vec<_> = state
            .player_map
            .values()
            .flat_map(|p| p.dice.iter().map(|d| d.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_start_needs_two_players() {
        let mut rng = GameRng::new(1);
        let result = start_round(&lobby(&["a"]), &mut rng, 0);
        assert!(matches!(result, Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_start_rejected_mid_round() {
        let mut rng = GameRng::new(1);
        let state = start_round(&lobby(&["a", "b"]), &mut rng, 0).unwrap();
        let result = start_round(&state, &mut rng, 0);
        assert!(matches!(result, Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_advance_applies_loss_and_target_starts() {
        let mut rng = GameRng::new(2);
        let mut state = start_round(&lobby(&["a", "b", "c"]), &mut rng, 0).unwrap();
        state.previous_bids.push_back(Bid::new("a", 1, 1));
        let state = round_over(&state, CallEffect::lose_die(PlayerId::new("c")));

        let next = start_round(&state, &mut rng, 0).unwrap();
        assert_eq!(next.status, GameStatus::AwaitingBid);
        assert_eq!(next.player(&PlayerId::new("c")).unwrap().num_dice(), 4);
        assert_eq!(next.active_player_id, PlayerId::new("c"));
        assert!(next.previous_bids.is_empty());
        assert!(next.active_call.is_none());
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn test_advance_applies_gain() {
        let mut rng = GameRng::new(2);
        let state = start_round(&lobby(&["a", "b"]), &mut rng, 0).unwrap();
        let state = round_over(&state, CallEffect::gain_die(PlayerId::new("b")));

        let next = start_round(&state, &mut rng, 0).unwrap();
        assert_eq!(next.player(&PlayerId::new("b")).unwrap().num_dice(), 6);
        assert_eq!(next.total_dice(), 11);
    }

    #[test]
    fn test_elimination_passes_start_to_next_player() {
        let config = GameConfig::classic().with_dice_per_player(1);
        let mut state = lobby(&["a", "b", "c"]);
        state.config = config;
        let mut rng = GameRng::new(3);
        let state = start_round(&state, &mut rng, 0).unwrap();
        let state = round_over(&state, CallEffect::lose_die(PlayerId::new("b")));

        let next = start_round(&state, &mut rng, 0).unwrap();
        assert_eq!(next.bidding_queue, vec![PlayerId::new("a"), PlayerId::new("c")]);
        assert_eq!(next.active_player_id, PlayerId::new("c"));
        assert!(next.player(&PlayerId::new("b")).unwrap().is_eliminated());
        assert!(!is_game_over(&next));
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn test_elimination_of_last_seat_wraps() {
        let mut state = lobby(&["a", "b", "c"]);
        state.config = GameConfig::classic().with_dice_per_player(1);
        let mut rng = GameRng::new(3);
        let state = start_round(&state, &mut rng, 0).unwrap();
        let state = round_over(&state, CallEffect::lose_die(PlayerId::new("c")));

        let next = start_round(&state, &mut rng, 0).unwrap();
        assert_eq!(next.active_player_id, PlayerId::new("a"));
    }

    #[test]
    fn test_last_elimination_ends_game() {
        let mut state = lobby(&["a", "b"]);
        state.config = GameConfig::classic().with_dice_per_player(1);
        let mut rng = GameRng::new(4);
        let state = start_round(&state, &mut rng, 0).unwrap();
        let state = round_over(&state, CallEffect::lose_die(PlayerId::new("a")));

        let next = start_round(&state, &mut rng, 0).unwrap();
        assert_eq!(next.status, GameStatus::GameOver);
        assert!(is_game_over(&next));
        assert_eq!(winner(&next), Some(PlayerId::new("b")));
        assert_eq!(next.active_player_id, PlayerId::new("b"));
        assert!(next.active_call.is_none());
        assert!(next.check_invariants().is_ok());

        let again = start_round(&next, &mut rng, 0);
        assert!(matches!(again, Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_lobby_is_never_over() {
        let state = lobby(&["a"]);
        assert!(!is_game_over(&state));
        assert_eq!(winner(&state), None);
    }

    #[test]
    fn test_turn_timer() {
        let mut state = lobby(&["a", "b"]);
        state.config = GameConfig::classic().with_turn_time_limit(Some(1_000));
        let mut rng = GameRng::new(5);
        let state = start_round(&state, &mut rng, 10_000).unwrap();

        assert_eq!(state.timer_start_time, Some(10_000));
        assert!(!is_turn_expired(&state, 10_999));
        assert!(is_turn_expired(&state, 11_000));

        let untimed = start_round(&lobby(&["a", "b"]), &mut rng, 10_000).unwrap();
        assert_eq!(untimed.timer_start_time, None);
        assert!(!is_turn_expired(&untimed, u64::MAX));
    }
}
