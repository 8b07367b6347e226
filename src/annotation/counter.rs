//! Process-wide batch group counter.
//!
//! Created once at startup and shared as `Arc<GroupCounter>`. It only moves
//! forward; there is no reset.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic group marker shared across every annotated batch.
#[derive(Debug, Default)]
pub struct GroupCounter {
    value: AtomicU64,
}

impl GroupCounter {
    /// Counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by one and return the new value as a single atomic step.
    pub fn advance(&self) -> u64 {
        self.value
            .fetch_add(1, Ordering::SeqCst)
            .saturating_add(1)
    }

    /// Current value without advancing.
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }
}
