//! `gavel` — a timed ascending-price auction simulator.
//!
//! A pool of automated bidders and one human bidder compete to raise the
//! price of a single lot before a countdown expires. The core is
//! [`AuctionEngine`], a single-owner state machine; [`AuctionDriver`]
//! supplies clock ticks, bid submissions, and asynchronous bidder-action
//! predictions around it.

pub mod auction;
pub mod config;
pub mod currency;
pub mod driver;
pub mod error;
pub mod names;
pub mod predict;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use auction::{
    Annotation, AuctionEngine, AuctionEvent, AuctionStatus, Bid, BidOutcome, Bidder, RejectReason,
};
pub use auction::engine::AuctionSnapshot;
pub use config::{AuctionConfig, USER_BIDDER_ID};
pub use currency::Currency;
pub use driver::AuctionDriver;
pub use error::{AuctionError, AuctionResult};
pub use names::{NameGenerator, NumberedNames, SampledNames};
pub use predict::{HeuristicPredictor, Prediction, PredictionInput, Predictor};
pub use traits::{RandomSource, SystemTimeProvider, ThreadRng, TimeProvider};
