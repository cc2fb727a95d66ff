//! Bid ledger entries.

use serde::{Deserialize, Serialize};

/// A single accepted bid.
///
/// Immutable once recorded. The ordered sequence of bids held by the engine
/// is the authoritative ledger: append-only, insertion order significant,
/// never reordered or deleted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Id of the bidder who placed this bid.
    pub bidder_id: String,

    /// Bid amount in atomic units of the auction currency.
    pub amount: u64,

    /// Unix timestamp in milliseconds when the bid was accepted.
    pub timestamp_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_equality() {
        let a = Bid {
            bidder_id: "bidder-0".into(),
            amount: 25_500,
            timestamp_ms: 1_700_000_000_000,
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
