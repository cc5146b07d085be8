//! # liars-dice
//!
//! Rules engine and concurrent game store for multiplayer Liar's Dice.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Every engine operation takes a `&GameState` and returns
//!    a new state or an error. Randomness and time are passed in, so a seeded
//!    `GameRng` replays a game exactly.
//!
//! 2. **Snapshots, Not Locks**: States are built from `im-rs` persistent
//!    structures. A committed state is shared as an `Arc` and never mutated;
//!    updates clone it cheaply and swap in the result.
//!
//! 3. **One Writer Per Game**: The store serializes updates per game and
//!    delivers every commit to subscribers in commit order. Different games
//!    never contend.
//!
//! ## Modules
//!
//! - `core`: Dice, players, bids, calls, configuration, game state, RNG
//! - `rules`: Lobby, bidding, calls, round advancement, dice actions
//! - `store`: Game ids, the concurrent store, subscriptions
//! - `view`: Per-viewer redaction of hidden information
//! - `error`: The shared error type

pub mod core;
pub mod error;
pub mod rules;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    Bid, Call, CallEffect, CallKind, Die, DieId, GameConfig, GameRng, GameState, GameStatus,
    Player, PlayerId,
};

pub use crate::error::{GameError, Result};

pub use crate::store::{GameId, GameIdConfig, GameStore, Subscription, SubscriptionId};

pub use crate::view::{redact_for, GameView};
