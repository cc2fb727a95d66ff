//! Bidder records and transient prediction annotations.

use serde::{Deserialize, Serialize};

use crate::config::USER_BIDDER_ID;

/// A transient AI-prediction annotation attached to an automated bidder.
///
/// Purely decorative: attached for a bounded display window and cleared by
/// the engine once `expires_at` passes. Never influences auction rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Free-text predicted action, e.g. "Place a higher bid".
    pub action: String,

    /// Prediction confidence in `[0, 1]`.
    pub confidence: f64,

    /// Unix timestamp in seconds after which the annotation is cleared.
    pub expires_at: u64,
}

/// A participant in the auction.
///
/// Created once at auction start (one per configured automated bidder, plus
/// the human), mutated in place as bids arrive, discarded on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bidder {
    /// Opaque id, unique within a run (`bidder-N` or `user-bidder`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// This bidder's latest accepted bid amount; 0 means they have not bid.
    pub current_bid: u64,

    /// Whether this bidder placed the last accepted bid.
    pub is_winning: bool,

    /// Transient prediction annotation, if one is currently live.
    pub annotation: Option<Annotation>,
}

impl Bidder {
    /// Create a fresh automated bidder with no bids.
    pub fn automated(index: u32, name: String) -> Self {
        Self {
            id: format!("bidder-{index}"),
            name,
            current_bid: 0,
            is_winning: false,
            annotation: None,
        }
    }

    /// Create the distinguished local human participant.
    pub fn human() -> Self {
        Self {
            id: USER_BIDDER_ID.to_string(),
            name: "You".to_string(),
            current_bid: 0,
            is_winning: false,
            annotation: None,
        }
    }

    /// Whether this record is the local human participant.
    pub fn is_human(&self) -> bool {
        self.id == USER_BIDDER_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automated_bidder_ids_are_indexed() {
        let bidder = Bidder::automated(3, "Eva D.".into());
        assert_eq!(bidder.id, "bidder-3");
        assert_eq!(bidder.current_bid, 0);
        assert!(!bidder.is_winning);
        assert!(bidder.annotation.is_none());
        assert!(!bidder.is_human());
    }

    #[test]
    fn test_human_bidder_is_distinguished() {
        let human = Bidder::human();
        assert_eq!(human.id, USER_BIDDER_ID);
        assert_eq!(human.name, "You");
        assert!(human.is_human());
    }
}
