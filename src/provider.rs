//! Provider abstraction for live input state
//!
//! A [`Provider`] is the capability a tagged expression binds to: a
//! repeatable, zero-argument source of fresh [`Sample`]s. The host supplies
//! a lookup (`selector → provider`) at resolver construction time; the
//! resolver calls it once per tagged node, and the resulting provider is
//! then sampled on every evaluation.
//!
//! `sample()` must not fail under normal operation. A provider backed by an
//! unreadable device is expected to return a best-effort snapshot; deciding
//! what that looks like is the driver's concern, not this crate's.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::sample::Sample;

/// Core trait for live input sources
///
/// `Send + Sync` is required so a resolved document can be handed to a
/// publish loop on another thread. The trait itself holds no mutable state;
/// thread-safety of the underlying device access is the implementor's
/// responsibility.
pub trait Provider: Send + Sync {
    /// Take a fresh snapshot of the current input state
    fn sample(&self) -> Sample;
}

/// Closures work as providers directly
impl<F> Provider for F
where
    F: Fn() -> Sample + Send + Sync,
{
    fn sample(&self) -> Sample {
        self()
    }
}

/// Mock provider for testing
///
/// Serves snapshots of a shared, externally mutable state and counts how
/// often it was sampled, so tests can assert the no-caching contract.
/// Cloning yields a handle to the same backing state.
#[derive(Clone, Default)]
pub struct MockProvider {
    state: Arc<Mutex<Sample>>,
    samples_taken: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a mock with all-default state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock serving the given initial state
    pub fn with_state(state: Sample) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            samples_taken: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the backing state; subsequent samples see the new values
    pub fn set_state(&self, state: Sample) {
        *self.state.lock().unwrap() = state;
    }

    /// Reset the backing state to all defaults
    pub fn clear(&self) {
        *self.state.lock().unwrap() = Sample::new();
    }

    /// Number of times `sample()` has been called
    pub fn samples_taken(&self) -> usize {
        self.samples_taken.load(Ordering::SeqCst)
    }
}

impl Provider for MockProvider {
    fn sample(&self) -> Sample {
        self.samples_taken.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().clone()
    }
}
