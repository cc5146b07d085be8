//! Rules engine.
//!
//! Every function here is pure: it reads a [`GameState`](crate::core::GameState)
//! and either returns a new state or an error, never touching the store and
//! holding no state of its own. Randomness is passed in as a
//! [`GameRng`](crate::core::GameRng) and time as a millisecond timestamp, so
//! the same inputs always produce the same output.
//!
//! - `lobby`: initial state, joining, leaving, config and profile updates, rematch
//! - `bidding`: bid validation and recording
//! - `calls`: dice counting and call resolution
//! - `rounds`: turn rotation, round advancement, game-over detection
//! - `dice`: rolling, revealing, rerolling
//!
//! ## Elimination
//!
//! A player is removed from the bidding queue in the same step that takes
//! their last die (round advancement). Queue membership therefore always
//! equals "holds at least one die", rotation never has to skip anybody, and
//! game over is detected from the queue alone.
//!
//! ## Example
//!
//! ```
//! use liars_dice::core::{Bid, CallKind, GameRng, GameStatus, Player};
//! use liars_dice::rules;
//!
//! let mut rng = GameRng::new(7);
//! let state = rules::initial_state(Player::new("ann", "Ann", "🦊"));
//! let state = rules::add_player(&state, Player::new("bob", "Bob", "🐻")).unwrap();
//! let state = rules::start_round(&state, &mut rng, 0).unwrap();
//! assert_eq!(state.status, GameStatus::AwaitingBid);
//!
//! let state = rules::apply_bid(&state, Bid::new("ann", 2, 3), 0).unwrap();
//! let state = rules::resolve_call(&state, CallKind::ChallengeBid).unwrap();
//! assert_eq!(state.status, GameStatus::RoundOver);
//! assert!(state.active_call.is_some());
//! ```

mod lobby;
mod bidding;
mod calls;
mod rounds;
mod dice;

pub use lobby::{
    add_player, initial_state, rematch, remove_player, update_config, update_player, MAX_PLAYERS,
    MIN_PLAYERS,
};
pub use bidding::{apply_bid, is_valid_next_bid, validate_bid};
pub use calls::{count_dice_with_value, is_call_correct, resolve_call};
pub use rounds::{is_game_over, is_turn_expired, next_active_player, start_round, winner};
pub use dice::{reroll_dice, reveal_dice, roll_die};
