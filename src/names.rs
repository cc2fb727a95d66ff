//! Bidder display-name generation.
//!
//! Injected at engine construction so tests can pin names while the binary
//! gets varied, human-looking bidders.

use crate::traits::RandomSource;

const FIRST_NAMES: [&str; 10] = [
    "Alex", "Ben", "Charlie", "Dana", "Eva", "Frank", "Grace", "Henry", "Ivy", "Jack",
];

const LAST_INITIALS: [&str; 10] = ["S", "J", "W", "B", "D", "M", "T", "H", "P", "R"];

/// Strategy for naming automated bidders.
pub trait NameGenerator: Send + Sync {
    /// Produce a display name for the automated bidder at `index`.
    fn bidder_name(&self, index: u32) -> String;
}

/// Samples a first name and a last initial from fixed pools, e.g. "Grace T.".
pub struct SampledNames<R: RandomSource> {
    random: R,
}

impl<R: RandomSource> SampledNames<R> {
    pub const fn new(random: R) -> Self {
        Self { random }
    }
}

impl<R: RandomSource> NameGenerator for SampledNames<R> {
    fn bidder_name(&self, _index: u32) -> String {
        let first = FIRST_NAMES[self.random.pick_index(FIRST_NAMES.len())];
        let initial = LAST_INITIALS[self.random.pick_index(LAST_INITIALS.len())];
        format!("{first} {initial}.")
    }
}

/// Numbered fallback names ("Bidder 1", "Bidder 2", ...), used by tests that
/// assert on specific bidders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedNames;

impl NameGenerator for NumberedNames {
    fn bidder_name(&self, index: u32) -> String {
        format!("Bidder {}", index + 1)
    }
}
