//! Lobby management: creating a game, seating players, and host settings.

use crate::core::{Dice, GameConfig, GameState, GameStatus, Player, PlayerId};
use crate::error::{GameError, Result};

/// Fewest players needed to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game can seat.
pub const MAX_PLAYERS: usize = 8;

/// Build the lobby for a new game hosted by `host`.
///
/// The lobby holds only the host, uses the classic ruleset, and has no bids
/// or calls. Game ids and player tokens are assigned elsewhere.
#[must_use]
pub fn initial_state(host: Player) -> GameState {
    GameState::new(host)
}

/// Seat a new player in the lobby.
///
/// Joining again with an id that is already seated returns the state
/// unchanged. Any dice the player carries are discarded.
pub fn add_player(state: &GameState, player: Player) -> Result<GameState> {
    if state.player_map.contains_key(&player.id) {
        return Ok(state.clone());
    }
    if state.status != GameStatus::InLobby {
        return Err(GameError::invalid_state(format!(
            "players can only join in the lobby, game is {}",
            state.status
        )));
    }
    if state.player_count() >= MAX_PLAYERS {
        return Err(GameError::invalid_state(format!(
            "game is full ({MAX_PLAYERS} players)"
        )));
    }

    let player = Player {
        dice: Dice::new(),
        ..player
    };
    let id = player.id.clone();

    let mut next = state.clone();
    next.seats.push_back(id.clone());
    next.bidding_queue.push(id.clone());
    next.player_map.insert(id, player);
    Ok(next)
}

/// Remove a player from the lobby. The host cannot leave.
pub fn remove_player(state: &GameState, player_id: &PlayerId) -> Result<GameState> {
    if state.status != GameStatus::InLobby {
        return Err(GameError::invalid_state(format!(
            "players can only leave in the lobby, game is {}",
            state.status
        )));
    }
    if !state.player_map.contains_key(player_id) {
        return Err(GameError::invalid_input(format!("player {player_id} is not in the game")));
    }
    if *player_id == state.host_player_id {
        return Err(GameError::invalid_input("the host cannot leave the lobby"));
    }

    let mut next = state.clone();
    next.player_map.remove(player_id);
    next.seats.retain(|id| id != player_id);
    next.bidding_queue.retain(|id| id != player_id);
    Ok(next)
}

/// Replace the ruleset. Only the host may do this, and only between rounds.
pub fn update_config(
    state: &GameState,
    requester: &PlayerId,
    config: GameConfig,
) -> Result<GameState> {
    if *requester != state.host_player_id {
        return Err(GameError::invalid_input(format!(
            "only the host can change the config, not {requester}"
        )));
    }
    if !matches!(state.status, GameStatus::InLobby | GameStatus::RoundOver) {
        return Err(GameError::invalid_state(format!(
            "config can only change between rounds, game is {}",
            state.status
        )));
    }
    config.validate()?;

    let mut next = state.clone();
    next.config = config;
    Ok(next)
}

/// Change a player's display name and emoji.
pub fn update_player(
    state: &GameState,
    player_id: &PlayerId,
    name: impl Into<String>,
    emoji: impl Into<String>,
) -> Result<GameState> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(GameError::invalid_input("player name cannot be empty"));
    }

    let mut next = state.clone();
    let player = next
        .player_mut(player_id)
        .ok_or_else(|| GameError::invalid_input(format!("player {player_id} is not in the game")))?;
    player.name = name;
    player.emoji = emoji.into();
    Ok(next)
}

/// Open a fresh lobby with the same host, players, seat order, and config.
///
/// Only a finished game can be rematched. The result is a new game state in
/// `InLobby`, so `GameOver` stays terminal for the old one.
pub fn rematch(state: &GameState) -> Result<GameState> {
    if state.status != GameStatus::GameOver {
        return Err(GameError::invalid_state(format!(
            "only a finished game can be rematched, game is {}",
            state.status
        )));
    }

    let host = state.require_player(&state.host_player_id)?.clone();
    let mut next = initial_state(host);
    next.config = state.config.clone();
    for player in state.players_in_seat_order() {
        next = add_player(&next, player.clone())?;
    }
    Ok(next)
}
