//! The auction state machine.
//!
//! `AuctionEngine` owns all auction state and is mutated only through
//! `submit_bid`, `tick`, `reset`, and `apply_prediction`. It is not
//! internally thread-safe: callers serialize access (the driver wraps it in
//! a single `RwLock`).
//!
//! Timer policy: an accepted bid resets the countdown to the full configured
//! duration (soft-close). The auction only ends after a full quiet period
//! with no accepted bids.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auction::{Annotation, AuctionEvent, Bid, Bidder};
use crate::config::{AuctionConfig, ANNOTATION_TTL_SECS, TIME_THRESHOLDS_SECS};
use crate::error::AuctionResult;
use crate::names::NameGenerator;
use crate::predict::Prediction;
use crate::traits::{SystemTimeProvider, TimeProvider};

/// Lifecycle of a single auction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuctionStatus {
    /// Countdown active, bids accepted.
    Running,
    /// Terminal. Only `reset` leaves this state.
    Ended,
}

/// Why a bid was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The auction has ended.
    AuctionClosed,
    /// The amount is below the minimum acceptable next bid.
    BidTooLow { minimum: u64 },
    /// The bidder id does not belong to this run.
    UnknownBidder,
}

/// Result of a bid submission. Rejection is a normal negative outcome, not
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl BidOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BidOutcome::Accepted)
    }
}

/// A cloned, serializable view of the full auction state for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionSnapshot {
    pub config: AuctionConfig,
    pub bidders: Vec<Bidder>,
    pub bid_history: Vec<Bid>,
    pub time_left: u64,
    pub highest_bid: u64,
    pub status: AuctionStatus,
    pub winner: Option<Bidder>,
}

/// The auction simulation engine.
pub struct AuctionEngine<T: TimeProvider> {
    config: AuctionConfig,
    bidders: Vec<Bidder>,
    ledger: Vec<Bid>,
    time_left: u64,
    highest_bid: u64,
    status: AuctionStatus,
    winner: Option<Bidder>,
    /// Bumped on every reset; outstanding async work from a previous run is
    /// detected by comparing generations.
    generation: u64,
    events: Vec<AuctionEvent>,
    time: T,
    names: Box<dyn NameGenerator>,
}

impl AuctionEngine<SystemTimeProvider> {
    /// Create an engine on the system clock with sampled bidder names.
    pub fn new(config: AuctionConfig) -> AuctionResult<Self> {
        use crate::names::SampledNames;
        use crate::traits::ThreadRng;

        Self::with_providers(
            config,
            SystemTimeProvider::new(),
            Box::new(SampledNames::new(ThreadRng::new())),
        )
    }
}

impl<T: TimeProvider> AuctionEngine<T> {
    /// Create an engine with explicit time and naming strategies.
    pub fn with_providers(
        config: AuctionConfig,
        time: T,
        names: Box<dyn NameGenerator>,
    ) -> AuctionResult<Self> {
        config.validate()?;
        let mut engine = Self {
            bidders: Vec::new(),
            ledger: Vec::new(),
            time_left: config.duration_secs,
            highest_bid: config.min_bid,
            status: AuctionStatus::Running,
            winner: None,
            generation: 0,
            events: Vec::new(),
            time,
            names,
            config,
        };
        engine.spawn_bidders();
        Ok(engine)
    }

    fn spawn_bidders(&mut self) {
        self.bidders = (0..self.config.num_bidders)
            .map(|i| Bidder::automated(i, self.names.bidder_name(i)))
            .collect();
        self.bidders.push(Bidder::human());
    }

    /// Submit a bid on behalf of `bidder_id`.
    ///
    /// Rejection rules, checked in order: the auction must be running, the
    /// bidder must belong to this run, and the amount must be at least
    /// `highest_bid + bid_increment`. Rejection leaves state untouched and
    /// reports the minimum acceptable amount so the caller can retry.
    pub fn submit_bid(&mut self, bidder_id: &str, amount: u64) -> BidOutcome {
        if self.status != AuctionStatus::Running {
            debug!(bidder_id, amount, "Bid rejected: auction closed");
            return BidOutcome::Rejected(RejectReason::AuctionClosed);
        }
        if !self.bidders.iter().any(|b| b.id == bidder_id) {
            debug!(bidder_id, "Bid rejected: unknown bidder");
            return BidOutcome::Rejected(RejectReason::UnknownBidder);
        }
        // Once the ledger tops out, no strictly higher amount is
        // representable and every further bid is rejected.
        let minimum = match self.highest_bid.checked_add(self.config.bid_increment) {
            Some(minimum) => minimum,
            None => {
                debug!(bidder_id, amount, "Bid rejected: ledger at maximum");
                return BidOutcome::Rejected(RejectReason::BidTooLow { minimum: u64::MAX });
            }
        };
        if amount < minimum {
            debug!(bidder_id, amount, minimum, "Bid rejected: too low");
            return BidOutcome::Rejected(RejectReason::BidTooLow { minimum });
        }

        self.ledger.push(Bid {
            bidder_id: bidder_id.to_string(),
            amount,
            timestamp_ms: self.time.now_millis(),
        });
        self.highest_bid = amount;
        // Soft close: a fresh bid restarts the full countdown.
        self.time_left = self.config.duration_secs;

        let mut bidder_name = String::new();
        for bidder in &mut self.bidders {
            if bidder.id == bidder_id {
                bidder.current_bid = amount;
                bidder.is_winning = true;
                bidder_name = bidder.name.clone();
            } else {
                bidder.is_winning = false;
            }
        }

        info!(bidder = %bidder_name, amount, "Bid accepted");
        self.events.push(AuctionEvent::BidAccepted {
            bidder_name,
            amount,
        });
        BidOutcome::Accepted
    }

    /// Advance the countdown by one second.
    ///
    /// No-op once ended. The running-to-ended transition happens exactly
    /// once, when the countdown reaches zero.
    pub fn tick(&mut self) {
        if self.status != AuctionStatus::Running {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        self.clear_expired_annotations();

        if TIME_THRESHOLDS_SECS.contains(&self.time_left) {
            self.events.push(AuctionEvent::TimeThreshold {
                remaining_secs: self.time_left,
            });
        }

        if self.time_left == 0 {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.status = AuctionStatus::Ended;
        self.winner = self
            .ledger
            .last()
            .and_then(|bid| self.bidders.iter().find(|b| b.id == bid.bidder_id))
            .cloned();

        match &self.winner {
            Some(winner) => info!(
                winner = %winner.name,
                amount = winner.current_bid,
                "Auction ended"
            ),
            None => info!("Auction ended with no bids"),
        }
        self.events.push(AuctionEvent::Ended {
            winner: self
                .winner
                .as_ref()
                .map(|w| (w.name.clone(), w.current_bid)),
        });
    }

    fn clear_expired_annotations(&mut self) {
        let now = self.time.now_unix();
        for bidder in &mut self.bidders {
            if let Some(annotation) = &bidder.annotation {
                if annotation.expires_at <= now {
                    bidder.annotation = None;
                }
            }
        }
    }

    /// Abandon the current run and reinitialize from `new_config`.
    ///
    /// Valid from any status; there is no partial-reset failure mode beyond
    /// config validation. Bumps the generation so stale async completions
    /// from the previous run are discarded.
    pub fn reset(&mut self, new_config: AuctionConfig) -> AuctionResult<()> {
        new_config.validate()?;
        info!(
            num_bidders = new_config.num_bidders,
            duration_secs = new_config.duration_secs,
            "Resetting auction"
        );
        self.config = new_config;
        self.ledger.clear();
        self.time_left = self.config.duration_secs;
        self.highest_bid = self.config.min_bid;
        self.status = AuctionStatus::Running;
        self.winner = None;
        self.generation += 1;
        self.events.clear();
        self.spawn_bidders();
        Ok(())
    }

    /// Attach a prediction annotation to an automated bidder.
    ///
    /// Applied only if `generation` still matches the current run, the
    /// auction is still running, and the bidder exists and is automated.
    /// Stale completions are dropped silently; returns whether the
    /// annotation was applied.
    pub fn apply_prediction(
        &mut self,
        generation: u64,
        bidder_id: &str,
        prediction: &Prediction,
    ) -> bool {
        if generation != self.generation {
            debug!(bidder_id, "Dropping prediction from a previous run");
            return false;
        }
        if self.status != AuctionStatus::Running {
            debug!(bidder_id, "Dropping prediction for an ended auction");
            return false;
        }
        let expires_at = self.time.now_unix() + ANNOTATION_TTL_SECS;
        let Some(bidder) = self
            .bidders
            .iter_mut()
            .find(|b| b.id == bidder_id && !b.is_human())
        else {
            debug!(bidder_id, "Dropping prediction for an unknown bidder");
            return false;
        };
        bidder.annotation = Some(Annotation {
            action: prediction.predicted_action.clone(),
            confidence: prediction.confidence.clamp(0.0, 1.0),
            expires_at,
        });
        true
    }

    /// Ids of automated bidders currently lacking an annotation — the
    /// candidate pool for the next prediction request.
    pub fn annotation_candidates(&self) -> Vec<String> {
        self.bidders
            .iter()
            .filter(|b| !b.is_human() && b.annotation.is_none())
            .map(|b| b.id.clone())
            .collect()
    }

    /// The smallest amount `submit_bid` would currently accept.
    ///
    /// Saturates at `u64::MAX`; at that point no further bid can be
    /// strictly higher and `submit_bid` rejects everything.
    pub fn minimum_next_bid(&self) -> u64 {
        self.highest_bid.saturating_add(self.config.bid_increment)
    }

    /// Bidders ordered by descending current bid.
    ///
    /// `sort_by` is stable, so bidders with equal bids (only possible in the
    /// initial all-zero state) keep creation order.
    pub fn leaderboard(&self) -> Vec<Bidder> {
        let mut sorted = self.bidders.clone();
        sorted.sort_by(|a, b| b.current_bid.cmp(&a.current_bid));
        sorted
    }

    /// The bid ledger in canonical insertion order.
    pub fn history(&self) -> &[Bid] {
        &self.ledger
    }

    /// Cloned full-state view for presentation.
    pub fn snapshot(&self) -> AuctionSnapshot {
        AuctionSnapshot {
            config: self.config.clone(),
            bidders: self.bidders.clone(),
            bid_history: self.ledger.clone(),
            time_left: self.time_left,
            highest_bid: self.highest_bid,
            status: self.status,
            winner: self.winner.clone(),
        }
    }

    /// Drain queued notification events.
    pub fn drain_events(&mut self) -> Vec<AuctionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    pub fn status(&self) -> AuctionStatus {
        self.status
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn highest_bid(&self) -> u64 {
        self.highest_bid
    }

    pub fn winner(&self) -> Option<&Bidder> {
        self.winner.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bidder(&self, id: &str) -> Option<&Bidder> {
        self.bidders.iter().find(|b| b.id == id)
    }
}
