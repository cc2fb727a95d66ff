//! Mock random source with a scripted value sequence.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::RandomSource;

/// Deterministic random source that replays a fixed sequence of unit values.
///
/// `pick_index` maps the next unit value onto `0..len`; the sequence cycles
/// when exhausted so tests never run dry.
#[derive(Debug, Clone)]
pub struct MockRandom {
    values: Arc<Mutex<(Vec<f64>, usize)>>,
}

impl MockRandom {
    /// Create a mock replaying `values` (each must be in `[0, 1)`).
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "MockRandom needs at least one value");
        Self {
            values: Arc::new(Mutex::new((values, 0))),
        }
    }

    /// A mock that always returns zero (always picks the first element).
    pub fn zeros() -> Self {
        Self::new(vec![0.0])
    }

    fn next(&self) -> f64 {
        let mut guard = self.values.lock();
        let (values, cursor) = &mut *guard;
        let value = values[*cursor % values.len()];
        *cursor += 1;
        value
    }
}

impl RandomSource for MockRandom {
    fn pick_index(&self, len: usize) -> usize {
        assert!(len > 0, "pick_index needs a non-empty range");
        ((self.next() * len as f64) as usize).min(len - 1)
    }

    fn unit(&self) -> f64 {
        self.next()
    }
}
