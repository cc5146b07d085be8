//! Per-game observer registry.
//!
//! Each game slot keeps its own list of callbacks. A [`Subscription`] handle
//! removes its callback when cancelled or dropped. The handle holds only a
//! weak reference to the slot, so evicting a game frees its state even while
//! handles are still alive.
//!
//! Once `cancel` returns, the callback is never started again, including by a
//! delivery pass that was already under way. A call that had already started
//! on another thread may still be running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use super::game_id::GameId;
use super::game_store::GameSlot;
use crate::core::GameState;

/// Callback invoked with each committed snapshot.
pub(crate) type Callback = Arc<dyn Fn(&Arc<GameState>) + Send + Sync>;

/// Identifier of one registered callback within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callbacks registered for one game, in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    inner: Mutex<SubscriberList>,
}

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<Arc<Entry>>,
}

struct Entry {
    id: SubscriptionId,
    callback: Callback,
    live: AtomicBool,
}

impl Subscribers {
    pub(crate) fn register(&self, callback: Callback) -> SubscriptionId {
        let mut list = self.inner.lock();
        let id = SubscriptionId(list.next_id);
        list.next_id += 1;
        list.entries.push(Arc::new(Entry {
            id,
            callback,
            live: AtomicBool::new(true),
        }));
        id
    }

    pub(crate) fn unregister(&self, id: SubscriptionId) -> bool {
        let mut list = self.inner.lock();
        match list.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                let entry = list.entries.remove(index);
                entry.live.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Deliver a snapshot to every callback.
    ///
    /// The list lock is released before any callback runs, so callbacks may
    /// cancel subscriptions. Entries cancelled mid-pass are skipped.
    pub(crate) fn notify(&self, snapshot: &Arc<GameState>) {
        let entries: Vec<Arc<Entry>> = self.inner.lock().entries.clone();
        for entry in entries {
            if entry.live.load(Ordering::Acquire) {
                (entry.callback)(snapshot);
            }
        }
    }
}

/// Handle for a registered callback.
///
/// Dropping the handle cancels the subscription.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    game_id: GameId,
    id: SubscriptionId,
    slot: Weak<GameSlot>,
}

impl Subscription {
    pub(crate) fn new(game_id: GameId, id: SubscriptionId, slot: &Arc<GameSlot>) -> Self {
        Self {
            game_id,
            id,
            slot: Arc::downgrade(slot),
        }
    }

    /// The game this subscription watches.
    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// The callback's identifier within its game.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stop receiving updates.
    pub fn cancel(self) {
        drop(self);
    }

    fn detach(&self) {
        if let Some(slot) = self.slot.upgrade() {
            if slot.subscribers.unregister(self.id) {
                debug!(game_id = %self.game_id, subscription = self.id.0, "unsubscribed");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("game_id", &self.game_id)
            .field("id", &self.id)
            .finish()
    }
}
