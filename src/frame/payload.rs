//! Opaque interpreter payloads carried on frames.
//!
//! The timeline stores and forwards these without looking inside. Only the
//! interpreter and the renderer give them meaning.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Key/value bag attached to a frame.
pub type FrameData = serde_json::Map<String, serde_json::Value>;

/// Interpreter-defined result value of a frame.
pub type FrameResult = serde_json::Value;

/// Shared reference to an interpreter execution context.
#[derive(Clone)]
pub struct ExecutionContext(Arc<dyn Any + Send + Sync>);

impl ExecutionContext {
    pub fn new<T: Any + Send + Sync>(context: T) -> Self {
        Self(Arc::new(context))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// True when both handles point at the same context.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExecutionContext(..)")
    }
}
