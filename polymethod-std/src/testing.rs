//! Testing utilities for polymethod.
//!
//! Test doubles for the handler side of a registry.
//!
//! # Features
//!
//! - [`RecordingHandler`]: Records every call's arguments as JSON
//! - [`ConstantHandler`]: Always replies with a clone of one value
//! - [`FailingHandler`]: Always fails with a fixed message
//! - [`CountingHandler`]: Counts calls and replies with unit

use polymethod_core::{Args, BoxError, Handler, Reply};
use std::{
    any::Any,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records the arguments of every call.
///
/// Arguments are stored as a JSON array per call, so tests can compare them
/// without knowing their concrete types.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// let registry = RegistryBuilder::for_interface::<dyn Greeter>()
///     .with_named_method("greet", recorder.clone())?
///     .build()?;
///
/// // ... call through the registry ...
///
/// assert_eq!(recorder.calls(), vec![json!(["dude"])]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl RecordingHandler {
    /// Create a new recording handler replying with unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls, oldest first.
    pub fn calls(&self) -> Vec<serde_json::Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Handler for RecordingHandler {
    fn handle(&self, args: Args) -> Result<Reply, BoxError> {
        let rendered = args.to_json()?;
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(rendered);
        Ok(Reply::unit())
    }
}

// ============================================================================
// Constant Handler
// ============================================================================

/// A handler that always replies with a clone of the same value.
#[derive(Clone)]
pub struct ConstantHandler<T> {
    value: T,
}

impl<T: Clone + Any + Send + Sync> ConstantHandler<T> {
    /// Reply with `value` on every call.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + Any + Send + Sync> Handler for ConstantHandler<T> {
    fn handle(&self, _args: Args) -> Result<Reply, BoxError> {
        Ok(Reply::new(self.value.clone()))
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails.
#[derive(Clone)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Fail every call with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Handler for FailingHandler {
    fn handle(&self, _args: Args) -> Result<Reply, BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Handler for CountingHandler {
    fn handle(&self, _args: Args) -> Result<Reply, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(Reply::unit())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstantHandler, CountingHandler, FailingHandler, RecordingHandler};
    use polymethod_core::{Args, Handler, args};

    #[test]
    fn test_recording_handler() {
        let recorder = RecordingHandler::new();
        let handle = recorder.clone();

        handle.handle(args!["a", 1_u8]).unwrap();
        handle.handle(Args::new()).unwrap();

        assert_eq!(recorder.count(), 2);
        assert_eq!(
            recorder.calls(),
            vec![serde_json::json!(["a", 1]), serde_json::json!([])]
        );

        recorder.clear();
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_doubles() {
        let constant = ConstantHandler::new(String::from("same"));
        assert_eq!(constant.handle(Args::new()).unwrap().downcast::<String>().unwrap(), "same");

        let failing = FailingHandler::new("always");
        assert_eq!(failing.handle(Args::new()).unwrap_err().to_string(), "always");

        let counter = CountingHandler::new();
        counter.handle(Args::new()).unwrap();
        counter.clone().handle(Args::new()).unwrap();
        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}
