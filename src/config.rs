//! Auction configuration and tuning constants.
//!
//! This module centralizes the per-run auction parameters and the magic
//! numbers that tune the simulation loop.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::{AuctionError, AuctionResult};

/// Minimum number of automated bidders per auction.
pub const MIN_BIDDERS: u32 = 2;

/// Maximum number of automated bidders per auction.
pub const MAX_BIDDERS: u32 = 50;

/// Minimum auction duration in seconds.
pub const MIN_DURATION_SECS: u64 = 60;

/// Maximum auction duration in seconds (1 hour).
pub const MAX_DURATION_SECS: u64 = 3600;

/// Interval between clock ticks driving the engine.
pub const TICK_INTERVAL_SECS: u64 = 1;

/// How long a bidder keeps a prediction annotation before it is cleared.
pub const ANNOTATION_TTL_SECS: u64 = 7;

/// Upper bound on a single prediction call before it is abandoned.
pub const PREDICTION_TIMEOUT_SECS: u64 = 10;

/// Remaining-time thresholds that emit a presentation notification.
pub const TIME_THRESHOLDS_SECS: [u64; 2] = [60, 10];

/// Reserved bidder id for the local human participant.
pub const USER_BIDDER_ID: &str = "user-bidder";

/// Immutable per-run auction parameters.
///
/// Supplied once at auction start and never mutated during a run. A new
/// config only takes effect through [`crate::AuctionEngine::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Number of automated bidders (the human participant is extra).
    pub num_bidders: u32,
    /// Currency the lot is denominated in.
    pub currency: Currency,
    /// Minimum opening bid in atomic currency units.
    pub min_bid: u64,
    /// Minimum increment over the current highest bid.
    pub bid_increment: u64,
    /// Countdown duration in seconds.
    pub duration_secs: u64,
}

impl AuctionConfig {
    /// Reject out-of-bounds parameters before the engine ever runs.
    ///
    /// The engine assumes a validated config for the whole run, so this is
    /// the single enforcement point.
    pub fn validate(&self) -> AuctionResult<()> {
        if self.num_bidders < MIN_BIDDERS || self.num_bidders > MAX_BIDDERS {
            return Err(AuctionError::Config(format!(
                "num_bidders must be between {MIN_BIDDERS} and {MAX_BIDDERS}, got {}",
                self.num_bidders
            )));
        }
        if self.min_bid == 0 {
            return Err(AuctionError::Config("min_bid must be positive".into()));
        }
        if self.bid_increment == 0 {
            return Err(AuctionError::Config(
                "bid_increment must be positive".into(),
            ));
        }
        if self.duration_secs < MIN_DURATION_SECS || self.duration_secs > MAX_DURATION_SECS {
            return Err(AuctionError::Config(format!(
                "duration_secs must be between {MIN_DURATION_SECS} and {MAX_DURATION_SECS}, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }
}

impl Default for AuctionConfig {
    /// The demo lot: 5 bidders on a 25 000 USD vintage car, 5 minute clock.
    fn default() -> Self {
        Self {
            num_bidders: 5,
            currency: Currency::Usd,
            min_bid: 25_000,
            bid_increment: 500,
            duration_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AuctionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_too_few_bidders() {
        let config = AuctionConfig {
            num_bidders: 1,
            ..AuctionConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("num_bidders"));
    }

    #[test]
    fn test_rejects_too_many_bidders() {
        let config = AuctionConfig {
            num_bidders: 51,
            ..AuctionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_min_bid() {
        let config = AuctionConfig {
            min_bid: 0,
            ..AuctionConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_bid"));
    }

    #[test]
    fn test_rejects_zero_increment() {
        let config = AuctionConfig {
            bid_increment: 0,
            ..AuctionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_duration() {
        let short = AuctionConfig {
            duration_secs: 59,
            ..AuctionConfig::default()
        };
        let long = AuctionConfig {
            duration_secs: 3601,
            ..AuctionConfig::default()
        };
        assert!(short.validate().is_err());
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_boundary_durations_are_valid() {
        for duration_secs in [MIN_DURATION_SECS, MAX_DURATION_SECS] {
            let config = AuctionConfig {
                duration_secs,
                ..AuctionConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }
}
