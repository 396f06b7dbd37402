//! Observable state container — subscribe/update over whole-state snapshots.
//!
//! DESIGN
//! ======
//! Each store holds one mutable snapshot plus a listener registry. Every
//! mutation replaces the snapshot and pushes a clone to all listeners;
//! `subscribe` pushes the current snapshot immediately so a late subscriber
//! never renders stale defaults. There is no cross-operation locking: two
//! in-flight async operations on the same store race, and whichever update
//! lands last wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    state: Mutex<T>,
    listeners: Mutex<HashMap<u64, Listener<T>>>,
    next_id: AtomicU64,
}

impl<T> Inner<T> {
    fn state(&self) -> MutexGuard<'_, T> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listeners(&self) -> MutexGuard<'_, HashMap<u64, Listener<T>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A shared observable value. Cloning the store clones the handle, not the
/// state; all clones see the same snapshot and listener registry.
pub struct Store<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Clone> Store<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(initial),
                listeners: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current snapshot, cloned out of the store.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.state().clone()
    }

    /// Replace the snapshot wholesale and notify listeners.
    pub fn set(&self, value: T) {
        *self.inner.state() = value;
        self.notify();
    }

    /// Mutate the snapshot in place and notify listeners once.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut state = self.inner.state();
            f(&mut state);
        }
        self.notify();
    }

    /// Register a listener and immediately push the current snapshot to it.
    ///
    /// The returned [`Subscription`] unregisters the listener when dropped.
    /// Listeners run with the registry lock held: a listener must not call
    /// back into `subscribe`/`set`/`update` on the same store.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners().insert(id, Box::new(callback));

        let snapshot = self.get();
        if let Some(listener) = self.inner.listeners().get(&id) {
            listener(&snapshot);
        }

        Subscription { id, inner: Arc::downgrade(&self.inner) }
    }

    fn notify(&self) {
        let snapshot = self.get();
        for listener in self.inner.listeners().values() {
            listener(&snapshot);
        }
    }
}

/// Drop guard for an active [`Store::subscribe`] registration.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription<T> {
    id: u64,
    inner: Weak<Inner<T>>,
}

impl<T> Subscription<T> {
    /// Explicitly unregister; equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.listeners().remove(&self.id);
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
