//! In-memory game store.
//!
//! ## Locking
//!
//! Games live in a `DashMap` keyed by [`GameId`]; each entry is an
//! `Arc<GameSlot>` that is cloned out before any per-game lock is taken, so a
//! slow update on one game never holds a map shard.
//!
//! Each slot has two locks:
//!
//! - `write`: a mutex held for the whole read-mutate-commit-notify sequence.
//!   Updates to one game are serialized; updates to different games never
//!   wait on each other.
//! - `current`: an `RwLock` around the latest `Arc<GameState>`. It is held
//!   only to clone or swap the `Arc`, so readers never see a half-applied
//!   update and never wait on a mutator.
//!
//! Subscribers are notified while `write` is still held, which makes delivery
//! order equal commit order. A callback may read the store or cancel
//! subscriptions, but it must not write to or subscribe to the same game:
//! that would wait on the `write` lock it is being called under. Such calls
//! fail with `InvalidState` instead of blocking. Queue the follow-up work and
//! apply it after the callback returns.

use std::cell::RefCell;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info, warn};

use super::game_id::{GameId, GameIdConfig};
use super::subscription::{Callback, Subscribers, Subscription};
use crate::core::{GameRng, GameState};
use crate::error::{GameError, Result};

thread_local! {
    /// Games whose subscribers are being notified on this thread.
    static NOTIFYING: RefCell<Vec<GameId>> = const { RefCell::new(Vec::new()) };
}

/// Marks a game as notifying on this thread until dropped.
struct NotifyScope;

impl NotifyScope {
    fn enter(game_id: &GameId) -> Self {
        NOTIFYING.with(|games| games.borrow_mut().push(game_id.clone()));
        NotifyScope
    }
}

impl Drop for NotifyScope {
    fn drop(&mut self) {
        NOTIFYING.with(|games| {
            games.borrow_mut().pop();
        });
    }
}

/// Fail if called from a subscriber callback of `game_id`.
fn ensure_not_notifying(game_id: &GameId) -> Result<()> {
    if NOTIFYING.with(|games| games.borrow().contains(game_id)) {
        warn!(game_id = %game_id, "write from inside a subscriber callback");
        return Err(GameError::invalid_state(format!(
            "game {game_id} cannot be changed from its own subscriber callback"
        )));
    }
    Ok(())
}

/// Storage for one game.
pub(crate) struct GameSlot {
    current: RwLock<Arc<GameState>>,
    write: Mutex<()>,
    pub(super) subscribers: Subscribers,
}

impl GameSlot {
    fn new(state: GameState) -> Self {
        Self {
            current: RwLock::new(Arc::new(state)),
            write: Mutex::new(()),
            subscribers: Subscribers::default(),
        }
    }

    fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.current.read())
    }

    /// Publish a new state. The caller proves it holds `write` by passing the guard.
    fn commit(&self, _write: &MutexGuard<'_, ()>, game_id: &GameId, state: GameState) -> Arc<GameState> {
        debug!(
            game_id = %game_id,
            status = %state.status,
            active_player = %state.active_player_id,
            bids = state.previous_bids.len(),
            "committed game state"
        );
        let snapshot = Arc::new(state);
        *self.current.write() = Arc::clone(&snapshot);
        let _scope = NotifyScope::enter(game_id);
        self.subscribers.notify(&snapshot);
        snapshot
    }
}

/// Concurrent map from game id to the game's current state.
///
/// ```
/// use liars_dice::core::Player;
/// use liars_dice::rules;
/// use liars_dice::store::{GameId, GameStore};
///
/// let store = GameStore::new();
/// let id = GameId::new("K7QRT");
/// store.set(&id, rules::initial_state(Player::new("ann", "Ann", "🦊"))).unwrap();
///
/// store
///     .transition(&id, |state| rules::add_player(state, Player::new("bob", "Bob", "🐻")))
///     .unwrap();
/// assert_eq!(store.get(&id).unwrap().player_count(), 2);
/// ```
#[derive(Default)]
pub struct GameStore {
    games: DashMap<GameId, Arc<GameSlot>>,
}

impl GameStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, game_id: &GameId) -> Result<Arc<GameSlot>> {
        self.games
            .get(game_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| GameError::NotFound(game_id.clone()))
    }

    // === Reads ===

    /// Get the current state of a game.
    pub fn get(&self, game_id: &GameId) -> Result<Arc<GameState>> {
        self.slot(game_id).map(|slot| slot.snapshot())
    }

    /// Check if a game is registered.
    #[must_use]
    pub fn contains(&self, game_id: &GameId) -> bool {
        self.games.contains_key(game_id)
    }

    /// Number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Check if no games are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Ids of every registered game, in no particular order.
    #[must_use]
    pub fn game_ids(&self) -> Vec<GameId> {
        self.games.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of live subscriptions on a game.
    pub fn subscriber_count(&self, game_id: &GameId) -> Result<usize> {
        self.slot(game_id).map(|slot| slot.subscribers.len())
    }

    // === Writes ===

    /// Replace a game's state, registering the game if it is new.
    pub fn set(&self, game_id: &GameId, state: GameState) -> Result<()> {
        ensure_not_notifying(game_id)?;
        let slot = match self.games.entry(game_id.clone()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(GameSlot::new(state)));
                info!(game_id = %game_id, "registered game");
                return Ok(());
            }
        };

        let guard = slot.write.lock();
        slot.commit(&guard, game_id, state);
        Ok(())
    }

    /// Register a new game; fails if the id is taken.
    pub fn insert(&self, game_id: &GameId, state: GameState) -> Result<()> {
        match self.games.entry(game_id.clone()) {
            Entry::Occupied(_) => Err(GameError::invalid_state(format!(
                "game {game_id} already exists"
            ))),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(GameSlot::new(state)));
                info!(game_id = %game_id, "registered game");
                Ok(())
            }
        }
    }

    /// Register a new game under a freshly generated id.
    ///
    /// Ids that collide with an existing game are discarded and redrawn, up to
    /// `config.max_attempts` times.
    pub fn create_game(
        &self,
        state: GameState,
        config: &GameIdConfig,
        rng: &mut GameRng,
    ) -> Result<GameId> {
        config.validate()?;
        for attempt in 1..=config.max_attempts {
            let game_id = config.generate(rng)?;
            match self.games.entry(game_id.clone()) {
                Entry::Occupied(_) => {
                    debug!(game_id = %game_id, attempt, "game id collision");
                }
                Entry::Vacant(entry) => {
                    entry.insert(Arc::new(GameSlot::new(state)));
                    info!(game_id = %game_id, attempt, "created game");
                    return Ok(game_id);
                }
            }
        }
        warn!(attempts = config.max_attempts, "game id space exhausted");
        Err(GameError::IdSpaceExhausted {
            attempts: config.max_attempts,
        })
    }

    /// Mutate a private copy of a game's state and commit it.
    ///
    /// The closure receives a copy; other readers keep seeing the previous
    /// snapshot until the closure returns and the copy is committed.
    pub fn update<R>(&self, game_id: &GameId, mutate: impl FnOnce(&mut GameState) -> R) -> Result<R> {
        ensure_not_notifying(game_id)?;
        let slot = self.slot(game_id)?;
        let guard = slot.write.lock();

        let mut draft = GameState::clone(&slot.snapshot());
        let out = mutate(&mut draft);
        slot.commit(&guard, game_id, draft);
        Ok(out)
    }

    /// Like [`update`](Self::update), but nothing is committed if the closure fails.
    pub fn try_update<R>(
        &self,
        game_id: &GameId,
        mutate: impl FnOnce(&mut GameState) -> Result<R>,
    ) -> Result<R> {
        ensure_not_notifying(game_id)?;
        let slot = self.slot(game_id)?;
        let guard = slot.write.lock();

        let mut draft = GameState::clone(&slot.snapshot());
        match mutate(&mut draft) {
            Ok(out) => {
                slot.commit(&guard, game_id, draft);
                Ok(out)
            }
            Err(err) => {
                warn!(game_id = %game_id, error = %err, "rejected game update");
                Err(err)
            }
        }
    }

    /// Compute the next state from the current one and commit it.
    ///
    /// Meant for engine functions of the shape `(&GameState, ..) -> Result<GameState>`.
    pub fn transition(
        &self,
        game_id: &GameId,
        step: impl FnOnce(&GameState) -> Result<GameState>,
    ) -> Result<Arc<GameState>> {
        ensure_not_notifying(game_id)?;
        let slot = self.slot(game_id)?;
        let guard = slot.write.lock();

        let current = slot.snapshot();
        match step(&current) {
            Ok(next) => Ok(slot.commit(&guard, game_id, next)),
            Err(err) => {
                warn!(game_id = %game_id, error = %err, "rejected game transition");
                Err(err)
            }
        }
    }

    /// Evict a game. Returns whether a game was removed.
    pub fn remove(&self, game_id: &GameId) -> bool {
        let removed = self.games.remove(game_id).is_some();
        if removed {
            info!(game_id = %game_id, "removed game");
        }
        removed
    }

    // === Subscriptions ===

    /// Watch a game's state.
    ///
    /// The callback runs once immediately with the current state, then after
    /// every commit, in commit order, until the returned handle is cancelled
    /// or dropped.
    pub fn subscribe<F>(&self, game_id: &GameId, callback: F) -> Result<Subscription>
    where
        F: Fn(&Arc<GameState>) + Send + Sync + 'static,
    {
        ensure_not_notifying(game_id)?;
        let slot = self.slot(game_id)?;
        let _guard = slot.write.lock();

        let callback: Callback = Arc::new(callback);
        {
            let _scope = NotifyScope::enter(game_id);
            callback(&slot.snapshot());
        }
        let id = slot.subscribers.register(callback);
        debug!(game_id = %game_id, subscription = id.0, "subscribed");
        Ok(Subscription::new(game_id.clone(), id, &slot))
    }
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("games", &self.games.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameStatus, Player};

    fn lobby() -> GameState {
        GameState::new(Player::new("host", "Host", "🎩"))
    }

    #[test]
    fn test_get_unknown_game() {
        let store = GameStore::new();
        let result = store.get(&GameId::new("NOPE"));
        assert_eq!(result.unwrap_err(), GameError::NotFound(GameId::new("NOPE")));
    }

    #[test]
    fn test_set_registers_then_replaces() {
        let store = GameStore::new();
        let id = GameId::new("G1");

        store.set(&id, lobby()).unwrap();
        assert!(store.contains(&id));
        assert_eq!(store.len(), 1);

        let mut replacement = lobby();
        replacement.status = GameStatus::AwaitingBid;
        store.set(&id, replacement).unwrap();
        assert_eq!(store.get(&id).unwrap().status, GameStatus::AwaitingBid);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let store = GameStore::new();
        let id = GameId::new("G1");
        store.insert(&id, lobby()).unwrap();
        assert!(matches!(store.insert(&id, lobby()), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_update_unknown_game() {
        let store = GameStore::new();
        let result = store.update(&GameId::new("NOPE"), |_| ());
        assert!(matches!(result, Err(GameError::NotFound(_))));
    }

    #[test]
    fn test_update_does_not_touch_old_snapshot() {
        let store = GameStore::new();
        let id = GameId::new("G1");
        store.set(&id, lobby()).unwrap();

        let before = store.get(&id).unwrap();
        store
            .update(&id, |state| {
                state.player_mut(&"host".into()).unwrap().name = "Renamed".to_string();
            })
            .unwrap();

        assert_eq!(before.player(&"host".into()).unwrap().name, "Host");
        assert_eq!(store.get(&id).unwrap().player(&"host".into()).unwrap().name, "Renamed");
    }

    #[test]
    fn test_try_update_discards_on_error() {
        let store = GameStore::new();
        let id = GameId::new("G1");
        store.set(&id, lobby()).unwrap();

        let result: Result<()> = store.try_update(&id, |state| {
            state.status = GameStatus::GameOver;
            Err(GameError::invalid_input("nope"))
        });

        assert!(result.is_err());
        assert_eq!(store.get(&id).unwrap().status, GameStatus::InLobby);
    }

    #[test]
    fn test_remove() {
        let store = GameStore::new();
        let id = GameId::new("G1");
        store.set(&id, lobby()).unwrap();

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
        assert!(matches!(store.get(&id), Err(GameError::NotFound(_))));
    }

    #[test]
    fn test_create_game_exhausts_tiny_id_space() {
        let store = GameStore::new();
        let config = GameIdConfig::default()
            .with_alphabet("A")
            .with_length(1)
            .with_max_attempts(3);
        let mut rng = GameRng::new(1);

        let id = store.create_game(lobby(), &config, &mut rng).unwrap();
        assert_eq!(id, GameId::new("A"));

        let result = store.create_game(lobby(), &config, &mut rng);
        assert_eq!(result, Err(GameError::IdSpaceExhausted { attempts: 3 }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_debug_output() {
        let store = GameStore::new();
        store.set(&GameId::new("G1"), lobby()).unwrap();
        assert_eq!(format!("{:?}", store), "GameStore { games: 1 }");
    }
}
