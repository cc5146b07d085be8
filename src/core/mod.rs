//! Core game types: dice, players, bids, calls, configuration, state, RNG.
//!
//! These are value types with no rules logic. The `rules` module computes new
//! states from them; the `store` module holds them between requests.

pub mod die;
pub mod player;
pub mod bid;
pub mod call;
pub mod config;
pub mod state;
pub mod rng;

pub use die::{Die, DieId, MAX_FACE, MIN_FACE};
pub use player::{Dice, Player, PlayerId};
pub use bid::Bid;
pub use call::{Call, CallEffect, CallKind};
pub use config::{GameConfig, MAX_DICE_PER_PLAYER};
pub use state::{GameState, GameStatus};
pub use rng::GameRng;
