//! Game state: the root aggregate for one game.
//!
//! ## Copy-on-write
//!
//! `GameState` is cloned on every store update, so the collections that can
//! grow with the game use `im` persistent structures:
//!
//! - `player_map` is an `im::HashMap`: a clone shares every `Player`, and
//!   [`GameState::player_mut`] copies only the player being changed.
//! - `previous_bids` and `seats` are `im::Vector`s with O(1) clone.
//!
//! The bidding queue and configuration are small and copied outright.
//!
//! ## Invariants
//!
//! After every engine operation:
//!
//! 1. `active_player_id` is in `bidding_queue` and in `player_map`.
//! 2. `bidding_queue` has no duplicates, is a subset of `player_map`, and,
//!    once dice are dealt, holds exactly the players with at least one die.
//! 3. `previous_bids` only grows during a round; its last element is the
//!    active bid.
//! 4. `active_call` is set only while the status is `RoundOver`.
//!
//! [`GameState::check_invariants`] verifies these.

use im::{HashMap as ImHashMap, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::bid::Bid;
use super::call::Call;
use super::config::GameConfig;
use super::die::DieId;
use super::player::{Player, PlayerId};
use crate::error::{GameError, Result};

/// Lifecycle of a game.
///
/// Legal transitions: `InLobby -> AwaitingBid -> RoundOver -> (AwaitingBid | GameOver)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Players are joining; no dice dealt yet.
    InLobby,
    /// A round is in progress and the active player must bid or call.
    AwaitingBid,
    /// A call resolved the round; its effect is pending.
    RoundOver,
    /// One player is left holding dice.
    GameOver,
}

impl GameStatus {
    /// Check if moving from `self` to `next` is a legal status edge.
    #[must_use]
    pub fn can_transition_to(self, next: GameStatus) -> bool {
        matches!(
            (self, next),
            (GameStatus::InLobby, GameStatus::AwaitingBid)
                | (GameStatus::AwaitingBid, GameStatus::RoundOver)
                | (GameStatus::RoundOver, GameStatus::AwaitingBid)
                | (GameStatus::RoundOver, GameStatus::GameOver)
        )
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::InLobby => "IN_LOBBY",
            GameStatus::AwaitingBid => "AWAITING_BID",
            GameStatus::RoundOver => "ROUND_OVER",
            GameStatus::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Ruleset.
    pub config: GameConfig,

    /// Lifecycle status.
    pub status: GameStatus,

    /// The player who created the game.
    pub host_player_id: PlayerId,

    /// Whose turn it is.
    pub active_player_id: PlayerId,

    /// Bids made this round, oldest first.
    pub previous_bids: Vector<Bid>,

    /// Every player in the game, eliminated or not.
    pub player_map: ImHashMap<PlayerId, Player>,

    /// Turn order of the players still holding dice.
    pub bidding_queue: Vec<PlayerId>,

    /// Join order of every player in the game.
    pub seats: Vector<PlayerId>,

    /// When the current turn timer started (milliseconds).
    pub timer_start_time: Option<u64>,

    /// The resolved call awaiting the next round.
    pub active_call: Option<Call>,

    next_die_id: u32,
}

impl GameState {
    /// Create a lobby containing only the host.
    ///
    /// The host's dice are discarded; dice are dealt when the first round
    /// starts.
    #[must_use]
    pub fn new(host: Player) -> Self {
        let host = Player { dice: Default::default(), ..host };
        let host_id = host.id.clone();

        let mut player_map = ImHashMap::new();
        player_map.insert(host_id.clone(), host);

        Self {
            config: GameConfig::classic(),
            status: GameStatus::InLobby,
            host_player_id: host_id.clone(),
            active_player_id: host_id.clone(),
            previous_bids: Vector::new(),
            player_map,
            bidding_queue: vec![host_id.clone()],
            seats: Vector::unit(host_id),
            timer_start_time: None,
            active_call: None,
            next_die_id: 0,
        }
    }

    // === Players ===

    /// Number of players in the game, eliminated or not.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_map.len()
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.player_map.get(id)
    }

    /// Get a mutable player, copying it out of any shared snapshot.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.player_map.get_mut(id)
    }

    /// Get a player or fail with `InvalidState`.
    pub fn require_player(&self, id: &PlayerId) -> Result<&Player> {
        self.player(id)
            .ok_or_else(|| GameError::invalid_state(format!("player {id} is not in the game")))
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> Result<&Player> {
        self.require_player(&self.active_player_id)
    }

    /// Iterate over players in seat order.
    pub fn players_in_seat_order(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter_map(|id| self.player_map.get(id))
    }

    /// Check if a player may take part in the current round.
    #[must_use]
    pub fn is_in_bidding_queue(&self, id: &PlayerId) -> bool {
        self.bidding_queue.contains(id)
    }

    /// Total dice in play across all players.
    #[must_use]
    pub fn total_dice(&self) -> usize {
        self.player_map.values().map(Player::num_dice).sum()
    }

    // === Bids ===

    /// The most recent bid this round.
    #[must_use]
    pub fn active_bid(&self) -> Option<&Bid> {
        self.previous_bids.last()
    }

    // === Dice ===

    /// Allocate a new die ID.
    ///
    /// Fails once the per-game id space is used up.
    pub fn alloc_die_id(&mut self) -> Result<DieId> {
        let id = DieId::new(self.next_die_id);
        self.next_die_id = self
            .next_die_id
            .checked_add(1)
            .ok_or_else(|| GameError::invalid_state("die id space exhausted"))?;
        Ok(id)
    }

    // === Invariants ===

    /// Verify the structural invariants listed in the module docs.
    pub fn check_invariants(&self) -> Result<()> {
        if !self.player_map.contains_key(&self.active_player_id) {
            return Err(GameError::invalid_state("active player missing from player map"));
        }
        if !self.is_in_bidding_queue(&self.active_player_id) {
            return Err(GameError::invalid_state("active player missing from bidding queue"));
        }

        let mut seen = FxHashSet::default();
        for id in &self.bidding_queue {
            if !seen.insert(id) {
                return Err(GameError::invalid_state(format!(
                    "player {id} appears twice in the bidding queue"
                )));
            }
            if !self.player_map.contains_key(id) {
                return Err(GameError::invalid_state(format!(
                    "queued player {id} missing from player map"
                )));
            }
        }

        if self.status != GameStatus::InLobby {
            for player in self.player_map.values() {
                if player.is_eliminated() == self.is_in_bidding_queue(&player.id) {
                    return Err(GameError::invalid_state(format!(
                        "bidding queue membership of {} disagrees with its {} dice",
                        player.id,
                        player.num_dice()
                    )));
                }
            }
        }

        match (&self.active_call, self.status) {
            (Some(_), status) if status != GameStatus::RoundOver => Err(GameError::invalid_state(
                format!("call pending while status is {status}"),
            )),
            (None, GameStatus::RoundOver) => {
                Err(GameError::invalid_state("round over without a resolved call"))
            }
            (Some(call), _) if !call.is_resolved() => {
                Err(GameError::invalid_state("round over with an unresolved call"))
            }
            _ => Ok(()),
        }
    }
}
