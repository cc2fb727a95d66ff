//! Time provider abstraction for testable time-dependent code.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing the current time.
///
/// This abstraction allows code that depends on the current time to be
/// tested with deterministic, controllable time values.
pub trait TimeProvider: Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now_unix(&self) -> u64;

    /// Returns the current Unix timestamp in milliseconds.
    ///
    /// Bid ledger entries carry millisecond timestamps so that bids placed
    /// within the same second still order unambiguously for display.
    fn now_millis(&self) -> u64 {
        self.now_unix() * 1000
    }
}

/// Production implementation that uses the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl SystemTimeProvider {
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_provider_returns_reasonable_value() {
        let provider = SystemTimeProvider::new();
        let now = provider.now_unix();

        // Should be after 2020 (1577836800) and before 2100 (4102444800)
        assert!(now > 1577836800, "Timestamp should be after 2020");
        assert!(now < 4102444800, "Timestamp should be before 2100");
    }

    #[test]
    fn test_system_time_provider_is_monotonic() {
        let provider = SystemTimeProvider::new();
        let t1 = provider.now_unix();
        let t2 = provider.now_unix();

        assert!(t2 >= t1, "Time should not go backwards");
    }

    #[test]
    fn test_millis_consistent_with_seconds() {
        let provider = SystemTimeProvider::new();
        let secs = provider.now_unix();
        let millis = provider.now_millis();

        // Within a couple of seconds of each other
        assert!(millis / 1000 >= secs);
        assert!(millis / 1000 <= secs + 2);
    }
}
