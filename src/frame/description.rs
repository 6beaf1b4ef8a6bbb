//! Lazily produced frame descriptions.
//!
//! Building a human-readable description can be expensive (it may walk the
//! interpreter's value graph), so frames carry a producer and only run it the
//! first time the description is read. Clones share the cache.

use std::fmt;
use std::sync::{Arc, OnceLock};

type Producer = dyn Fn() -> String + Send + Sync;

#[derive(Clone)]
pub struct LazyDescription {
    producer: Arc<Producer>,
    cached: Arc<OnceLock<String>>,
}

impl LazyDescription {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(producer),
            cached: Arc::new(OnceLock::new()),
        }
    }

    /// Description that is already known; the producer never runs.
    pub fn ready(text: impl Into<String>) -> Self {
        let cached = OnceLock::new();
        let _ = cached.set(text.into());
        Self {
            producer: Arc::new(String::new),
            cached: Arc::new(cached),
        }
    }

    /// Returns the description, running the producer on first access.
    pub fn get(&self) -> &str {
        self.cached.get_or_init(|| (self.producer)())
    }

    pub fn is_evaluated(&self) -> bool {
        self.cached.get().is_some()
    }
}

impl Default for LazyDescription {
    fn default() -> Self {
        Self::ready(String::new())
    }
}

impl fmt::Debug for LazyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cached.get() {
            Some(text) => f.debug_tuple("LazyDescription").field(text).finish(),
            None => f.write_str("LazyDescription(<pending>)"),
        }
    }
}
