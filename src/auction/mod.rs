//! The auction engine: state, bidding rules, countdown, and winner
//! determination.

pub mod bid;
pub mod bidder;
pub mod engine;
pub mod events;

pub use bid::Bid;
pub use bidder::{Annotation, Bidder};
pub use engine::{AuctionEngine, AuctionStatus, BidOutcome, RejectReason};
pub use events::AuctionEvent;
