//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use liars_dice::core::{GameConfig, GameRng, GameState, Player};
use liars_dice::rules;
use tracing_subscriber::{fmt, EnvFilter};

static INIT_LOGGING: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A lobby hosted by the first id, with the rest seated in order.
pub fn lobby(ids: &[&str], config: GameConfig) -> GameState {
    let (host, rest) = ids.split_first().expect("at least one player");
    let mut state = rules::initial_state(Player::new(*host, host.to_uppercase(), "🎲"));
    for id in rest {
        state = rules::add_player(&state, Player::new(*id, id.to_uppercase(), "🎲")).unwrap();
    }
    rules::update_config(&state, &state.host_player_id.clone(), config).unwrap()
}

/// A lobby moved into its first round.
pub fn started(ids: &[&str], config: GameConfig, seed: u64) -> GameState {
    rules::start_round(&lobby(ids, config), &mut GameRng::new(seed), 0).unwrap()
}
