//! Bidder-action prediction collaborator.
//!
//! The prediction service is an external, fallible, latency-unbounded
//! collaborator. It is injected behind the [`Predictor`] trait; failures are
//! absorbed at the call site and degrade to "no annotation shown". Nothing
//! here ever influences the auction rules.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auction::Bid;
use crate::traits::RandomSource;

/// Auction context handed to the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInput {
    pub auction_id: String,
    pub bidder_id: String,
    pub current_bid: u64,
    pub time_remaining: u64,
    pub bid_history: Vec<Bid>,
}

/// What the prediction service thinks a bidder will do next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Free-text label, e.g. "Place a higher bid".
    pub predicted_action: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Free-text rationale.
    pub reason: String,
}

impl Prediction {
    /// Neutral fallback substituted when the collaborator fails.
    pub fn unavailable() -> Self {
        Self {
            predicted_action: "No prediction available".to_string(),
            confidence: 0.0,
            reason: "Prediction service unavailable".to_string(),
        }
    }
}

/// Abstraction over the bidder-action prediction service.
///
/// Implementations may suspend for arbitrarily long; callers bound the call
/// with a timeout and discard stale completions.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Predict the named bidder's likely next move.
    async fn predict(&self, input: &PredictionInput) -> Result<Prediction>;
}

const ACTIONS: [&str; 3] = ["Place a higher bid", "Wait and see", "Drop out of the auction"];

/// Local heuristic stand-in for the remote prediction service.
///
/// Weighs auction pressure (time remaining, recent bid activity) and adds
/// injected randomness so repeated runs vary. Deterministic under a mock
/// random source.
pub struct HeuristicPredictor<R: RandomSource> {
    random: R,
}

impl<R: RandomSource> HeuristicPredictor<R> {
    pub const fn new(random: R) -> Self {
        Self { random }
    }
}

#[async_trait]
impl<R: RandomSource> Predictor for HeuristicPredictor<R> {
    async fn predict(&self, input: &PredictionInput) -> Result<Prediction> {
        let has_bid = input
            .bid_history
            .iter()
            .any(|bid| bid.bidder_id == input.bidder_id);
        let closing = input.time_remaining <= 30;

        // Bias the pick: active bidders keep bidding, everyone cools off as
        // the clock runs down.
        let action = if closing && !has_bid {
            ACTIONS[2]
        } else if has_bid && self.random.unit() < 0.6 {
            ACTIONS[0]
        } else {
            ACTIONS[self.random.pick_index(ACTIONS.len())]
        };

        let reason = if has_bid {
            format!(
                "Already invested at {} with {}s left",
                input.current_bid, input.time_remaining
            )
        } else {
            format!("No bids yet with {}s left", input.time_remaining)
        };

        Ok(Prediction {
            predicted_action: action.to_string(),
            confidence: 0.4 + self.random.unit() * 0.5,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockRandom;

    fn input(bidder_id: &str, time_remaining: u64, bid_history: Vec<Bid>) -> PredictionInput {
        PredictionInput {
            auction_id: "auction-1".into(),
            bidder_id: bidder_id.into(),
            current_bid: 25_500,
            time_remaining,
            bid_history,
        }
    }

    #[tokio::test]
    async fn test_unavailable_fallback_is_neutral() {
        let fallback = Prediction::unavailable();
        assert_eq!(fallback.confidence, 0.0);
        assert_eq!(fallback.predicted_action, "No prediction available");
    }

    #[tokio::test]
    async fn test_heuristic_confidence_in_range() {
        let predictor = HeuristicPredictor::new(MockRandom::new(vec![0.0, 0.99, 0.5]));
        let prediction = predictor.predict(&input("bidder-0", 120, vec![])).await.unwrap();
        assert!((0.0..=1.0).contains(&prediction.confidence));
        assert!(ACTIONS.contains(&prediction.predicted_action.as_str()));
    }

    #[tokio::test]
    async fn test_quiet_bidder_drops_out_near_close() {
        let predictor = HeuristicPredictor::new(MockRandom::new(vec![0.5]));
        let prediction = predictor.predict(&input("bidder-3", 20, vec![])).await.unwrap();
        assert_eq!(prediction.predicted_action, "Drop out of the auction");
    }

    #[tokio::test]
    async fn test_active_bidder_tends_to_rebid() {
        let history = vec![Bid {
            bidder_id: "bidder-0".into(),
            amount: 25_500,
            timestamp_ms: 0,
        }];
        // unit() draw below the 0.6 rebid bias
        let predictor = HeuristicPredictor::new(MockRandom::new(vec![0.1, 0.2]));
        let prediction = predictor
            .predict(&input("bidder-0", 200, history))
            .await
            .unwrap();
        assert_eq!(prediction.predicted_action, "Place a higher bid");
        assert!(prediction.reason.contains("Already invested"));
    }
}
