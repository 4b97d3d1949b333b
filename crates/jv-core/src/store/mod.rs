//! Filter state store
//!
//! Owns the shared [`FilterState`] and broadcasts every patch to its
//! subscribers. Views hold a reference to the store, submit patches, and
//! redraw from the notification; they never talk to each other directly.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::state::{FilterPatch, FilterState};

/// Trait for components that need to respond to filter state changes.
pub trait StateSubscriber: Send + Sync {
    /// Called once per patch, after the merge, with the new full state.
    fn on_state_change(&self, state: &FilterState);
}

/// The shared filter state store.
///
/// `patch` merges under the write lock, then notifies subscribers in
/// registration order with the lock released, so a handler may patch again
/// in response (and accept another notification round). Notification is
/// never suppressed for a value-equal patch; views are expected to no-op
/// cheaply on equal state.
pub struct FilterStore {
    state: Arc<RwLock<FilterState>>,
    subscribers: Arc<RwLock<Vec<Weak<dyn StateSubscriber>>>>,
}

impl FilterStore {
    /// Create a store holding the default (unrestricted) state.
    pub fn new() -> Self {
        Self::with_state(FilterState::default())
    }

    /// Create a store holding a specific initial state.
    pub fn with_state(state: FilterState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of the current state. Callers get their own copy; mutating
    /// it has no effect on the store.
    pub fn state(&self) -> FilterState {
        self.state.read().clone()
    }

    /// Merge a patch into the state, then synchronously notify all
    /// subscribers with the new full state.
    pub fn patch(&self, patch: FilterPatch) {
        let mut state = self.state.write();
        state.apply(patch);
        drop(state);

        self.notify_subscribers();
    }

    /// Add a subscriber. The store keeps a weak reference: dropping the
    /// subscriber's `Arc` unsubscribes it.
    pub fn add_subscriber(&self, subscriber: Arc<dyn StateSubscriber>) {
        let mut subscribers = self.subscribers.write();
        subscribers.push(Arc::downgrade(&subscriber));
    }

    /// Notify all live subscribers of a state change.
    fn notify_subscribers(&self) {
        let snapshot = self.state();
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        // Notify live subscribers in registration order
        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_state_change(&snapshot);
            }
        }
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}
