//! Concurrent per-game state store.
//!
//! The store keeps the current [`GameState`](crate::core::GameState) of every
//! live game behind an `Arc` snapshot. Readers clone the `Arc`; writers build
//! a new state and swap it in. Subscribers see every committed state once,
//! in commit order, starting with the state current at subscription time.
//!
//! The store knows nothing about the rules. Callers run engine functions
//! inside [`GameStore::transition`] so that read, validate and commit happen
//! under one per-game lock:
//!
//! ```
//! use liars_dice::core::{GameRng, Player};
//! use liars_dice::rules;
//! use liars_dice::store::{GameIdConfig, GameStore};
//!
//! let store = GameStore::new();
//! let mut rng = GameRng::new(1);
//! let initial = rules::initial_state(Player::new("ann", "Ann", "🦊"));
//! let id = store.create_game(initial, &GameIdConfig::default(), &mut rng).unwrap();
//!
//! let _sub = store.subscribe(&id, |state| println!("{} players", state.player_count())).unwrap();
//! store
//!     .transition(&id, |state| rules::add_player(state, Player::new("bob", "Bob", "🐻")))
//!     .unwrap();
//! ```

mod game_id;
mod game_store;
mod subscription;

pub use game_id::{GameId, GameIdConfig};
pub use game_store::GameStore;
pub use subscription::{Subscription, SubscriptionId};
