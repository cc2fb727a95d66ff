//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions
//! that allow deterministic testing without wall clocks, real randomness,
//! or an external prediction service.

pub mod predict;
pub mod random;
pub mod time;

pub use predict::MockPredictor;
pub use random::MockRandom;
pub use time::MockTime;
