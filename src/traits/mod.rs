//! Trait abstractions for dependency injection and testability.
//!
//! The engine and driver depend on wall-clock time, randomness, and an
//! external prediction service. Each is injected behind a trait so the
//! simulation is deterministic under test.

pub mod random;
pub mod time;

pub use random::RandomSource;
pub use time::TimeProvider;

// Re-export default implementations
pub use random::ThreadRng;
pub use time::SystemTimeProvider;
