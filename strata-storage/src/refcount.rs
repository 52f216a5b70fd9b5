//! Shared-ownership counting with last-release semantics.

use std::sync::atomic::{AtomicU64, Ordering, fence};

/// Atomic reference count whose zero transition is observed exactly once.
///
/// The count starts at one for the creator. [`retain`](Refs::retain) and
/// [`release`](Refs::release) are the only two mutating operations;
/// `release` performs the zero check atomically, so across any number of
/// concurrent releasers exactly one sees `true` and owns the teardown.
pub struct Refs {
    count: AtomicU64,
}

impl Refs {
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(1),
        }
    }

    /// Current count. Meaningful for diagnostics and tests only; by the
    /// time the caller looks at it, it may already be stale.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Add one reference on behalf of a new holder.
    ///
    /// Must only be called while the caller itself holds a reference; the
    /// count can therefore never be observed at zero here.
    pub fn retain(&self) {
        let prev = self.count.fetch_add(1, Ordering::Relaxed);
        assert_ne!(prev, 0, "retain after the last reference was released");
    }

    /// Drop one reference.
    ///
    /// Returns `true` for exactly the release that takes the count to
    /// zero; that caller runs the teardown. All writes made by other
    /// holders before their release are visible to it.
    #[must_use]
    pub fn release(&self) -> bool {
        let prev = self.count.fetch_sub(1, Ordering::Release);
        assert_ne!(prev, 0, "release without a matching reference");
        if prev == 1 {
            fence(Ordering::Acquire);
            true
        } else {
            false
        }
    }
}

impl Default for Refs {
    fn default() -> Self {
        Self::new()
    }
}
