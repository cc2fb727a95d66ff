//! Notification events emitted by the engine for presentation.
//!
//! Events are queued inside the engine and drained by the driver. The
//! engine's correctness never depends on anyone observing them.

use serde::{Deserialize, Serialize};

/// A presentation notification produced by an engine state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionEvent {
    /// A bid was accepted.
    BidAccepted { bidder_name: String, amount: u64 },

    /// The countdown crossed a display threshold (e.g. 60 s, 10 s left).
    TimeThreshold { remaining_secs: u64 },

    /// The auction ended. `winner` is the winning bidder's name and final
    /// amount, or `None` if no bids were ever placed.
    Ended { winner: Option<(String, u64)> },
}
