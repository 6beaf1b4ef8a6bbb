//! Observable store
//!
//! A minimal subscribe/snapshot registry. Producers `publish` a complete new
//! snapshot; every current listener is then called once with it. Consumers
//! can also read the latest snapshot at any time with `get_snapshot`, which
//! returns the same `Arc` until the next publication.
//!
//! The registry lock is released before listeners run, so a listener may read
//! the store, subscribe, or unsubscribe (itself or others) from inside its
//! callback. Removing a listener mid-round does not stop delivery to the
//! listeners that were registered when the round started.

use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;

type Listener<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

struct Registry<S> {
    snapshot: Arc<S>,
    version: u64,
    next_id: u64,
    listeners: Vec<(u64, Listener<S>)>,
}

pub struct Store<S> {
    inner: Arc<Mutex<Registry<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Send + Sync + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                snapshot: Arc::new(initial),
                version: 0,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn get_snapshot(&self) -> Arc<S> {
        self.inner.lock().snapshot.clone()
    }

    /// Number of publications so far.
    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<S>) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.inner.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Arc::new(listener)));
            id
        };

        let registry: Weak<Mutex<Registry<S>>> = Arc::downgrade(&self.inner);
        Subscription {
            remove: Arc::new(move || {
                let Some(registry) = registry.upgrade() else {
                    return false;
                };
                let mut registry = registry.lock();
                let before = registry.listeners.len();
                registry.listeners.retain(|(lid, _)| *lid != id);
                registry.listeners.len() != before
            }),
        }
    }

    /// Replace the snapshot and notify every current listener exactly once.
    pub fn publish(&self, snapshot: S) {
        let (snapshot, listeners, version) = {
            let mut registry = self.inner.lock();
            registry.snapshot = Arc::new(snapshot);
            registry.version += 1;
            let listeners: Vec<Listener<S>> =
                registry.listeners.iter().map(|(_, l)| l.clone()).collect();
            (registry.snapshot.clone(), listeners, registry.version)
        };

        trace!(version, listeners = listeners.len(), "Publishing snapshot");
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<S> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.lock();
        f.debug_struct("Store")
            .field("version", &registry.version)
            .field("listeners", &registry.listeners.len())
            .finish()
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    remove: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Subscription {
    /// Remove the listener. Returns false if it was already removed.
    pub fn unsubscribe(&self) -> bool {
        (self.remove)()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription(..)")
    }
}
