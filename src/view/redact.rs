//! Redaction of hidden dice and bid history.

use serde::{Deserialize, Serialize};

use crate::core::{Bid, Call, Die, DieId, GameConfig, GameState, GameStatus, Player, PlayerId};

/// One die as a viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieView {
    pub id: DieId,
    /// `None` when the value is hidden from the viewer.
    pub value: Option<u8>,
    pub is_visible: bool,
}

/// One player as a viewer sees them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub emoji: String,
    /// `None` when die counts are hidden from the viewer.
    pub num_dice: Option<usize>,
    /// Empty when die counts are hidden.
    pub dice: Vec<DieView>,
    pub is_eliminated: bool,
}

/// A game as a viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub config: GameConfig,
    pub status: GameStatus,
    pub host_player_id: PlayerId,
    pub active_player_id: PlayerId,
    /// Players in seat order.
    pub players: Vec<PlayerView>,
    pub bidding_queue: Vec<PlayerId>,
    pub previous_bids: Vec<Bid>,
    pub timer_start_time: Option<u64>,
    pub active_call: Option<Call>,
}

/// Project a state for one viewer. `None` is a spectator.
///
/// - Viewers always see their own dice.
/// - Other dice show their value when visible, and all values show once the
///   round is settled (`RoundOver` or `GameOver`).
/// - With `show_num_dice` off, other players' dice and counts are hidden
///   while a round is in progress.
/// - With `hide_logs_during_round` on, only the active bid is kept while a
///   round is in progress.
#[must_use]
pub fn redact_for(state: &GameState, viewer: Option<&PlayerId>) -> GameView {
    let previous_bids = if state.config.hide_logs_during_round && in_round(state) {
        state.active_bid().cloned().into_iter().collect()
    } else {
        state.previous_bids.iter().cloned().collect()
    };

    GameView {
        config: state.config.clone(),
        status: state.status,
        host_player_id: state.host_player_id.clone(),
        active_player_id: state.active_player_id.clone(),
        players: state
            .players_in_seat_order()
            .map(|player| player_view(state, player, viewer))
            .collect(),
        bidding_queue: state.bidding_queue.clone(),
        previous_bids,
        timer_start_time: state.timer_start_time,
        active_call: state.active_call.clone(),
    }
}

fn in_round(state: &GameState) -> bool {
    state.status == GameStatus::AwaitingBid
}

fn is_settled(state: &GameState) -> bool {
    matches!(state.status, GameStatus::RoundOver | GameStatus::GameOver)
}

fn player_view(state: &GameState, player: &Player, viewer: Option<&PlayerId>) -> PlayerView {
    let is_owner = viewer == Some(&player.id);
    let counts_hidden = !is_owner && !state.config.show_num_dice && in_round(state);
    let is_eliminated =
        state.status != GameStatus::InLobby && !state.is_in_bidding_queue(&player.id);

    let (num_dice, dice) = if counts_hidden {
        (None, Vec::new())
    } else {
        let reveal_all = is_owner || is_settled(state);
        let dice = player.dice.iter().map(|die| die_view(die, reveal_all)).collect();
        (Some(player.num_dice()), dice)
    };

    PlayerView {
        id: player.id.clone(),
        name: player.name.clone(),
        emoji: player.emoji.clone(),
        num_dice,
        dice,
        is_eliminated,
    }
}

fn die_view(die: &Die, reveal: bool) -> DieView {
    DieView {
        id: die.id,
        value: (reveal || die.is_visible).then_some(die.value),
        is_visible: die.is_visible,
    }
}
