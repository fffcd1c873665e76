//! Epoch/generation counter for cooperative loop supersession.
//!
//! Every state-changing operation requests a new epoch; exactly one epoch is
//! current at any instant. A tick loop must call [`EpochGuard::is_current`]
//! immediately before every mutation or publication and stop without writing
//! once it returns false. There is no hard preemption and no lock: the
//! invalidation is advisory.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque token identifying one version of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch(u64);

/// Generation counter guaranteeing single-writer semantics for the tick loop.
#[derive(Debug, Default)]
pub struct EpochGuard {
    current: AtomicU64,
}

impl EpochGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the previously current epoch and return the new one.
    /// O(1), non-blocking.
    pub fn new_epoch(&self) -> Epoch {
        Epoch(self.current.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Whether `epoch` is still the current one. The only check a tick loop
    /// may rely on before mutating shared state.
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.current.load(Ordering::Relaxed) == epoch.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_epoch_is_current() {
        let guard = EpochGuard::new();
        let epoch = guard.new_epoch();
        assert!(guard.is_current(epoch));
    }

    #[test]
    fn new_epoch_invalidates_previous() {
        let guard = EpochGuard::new();
        let first = guard.new_epoch();
        let second = guard.new_epoch();

        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn epochs_are_distinct() {
        let guard = EpochGuard::new();
        let a = guard.new_epoch();
        let b = guard.new_epoch();
        assert_ne!(a, b);
    }

    #[test]
    fn only_latest_epoch_is_current() {
        let guard = EpochGuard::new();
        let epochs: Vec<_> = (0..10).map(|_| guard.new_epoch()).collect();

        for stale in &epochs[..9] {
            assert!(!guard.is_current(*stale));
        }
        assert!(guard.is_current(epochs[9]));
    }
}
