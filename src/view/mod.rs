//! Per-viewer projections of game state.
//!
//! A [`GameState`](crate::core::GameState) holds every die value. Before a
//! state leaves the process it is projected through [`redact_for`], which
//! replaces everything the viewer may not see with `None` or drops it.

mod redact;

pub use redact::{redact_for, DieView, GameView, PlayerView};
