//! Cooperative async driver for the auction engine.
//!
//! The engine itself is a plain state machine with no notion of wall-clock
//! scheduling. `AuctionDriver` supplies the external stimuli: a 1 Hz clock
//! task calling `tick()`, bid submissions from the presentation layer, and
//! fire-and-forget prediction requests. All mutation goes through one
//! `RwLock`, so no two state changes interleave.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::auction::{AuctionEngine, AuctionEvent, AuctionStatus, BidOutcome};
use crate::config::{AuctionConfig, PREDICTION_TIMEOUT_SECS, TICK_INTERVAL_SECS};
use crate::error::AuctionResult;
use crate::predict::{PredictionInput, Predictor};
use crate::traits::{RandomSource, TimeProvider};

/// Drives one `AuctionEngine` with clock ticks, bids, and predictions.
pub struct AuctionDriver<T: TimeProvider> {
    engine: Arc<RwLock<AuctionEngine<T>>>,
    predictor: Arc<dyn Predictor>,
    random: Arc<dyn RandomSource>,
    events_tx: mpsc::UnboundedSender<AuctionEvent>,
    shutdown: CancellationToken,
    auction_id: String,
}

impl<T: TimeProvider> Clone for AuctionDriver<T> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            predictor: self.predictor.clone(),
            random: self.random.clone(),
            events_tx: self.events_tx.clone(),
            shutdown: self.shutdown.clone(),
            auction_id: self.auction_id.clone(),
        }
    }
}

impl<T: TimeProvider + 'static> AuctionDriver<T> {
    /// Wrap an engine and hand back the notification event stream.
    pub fn new(
        engine: AuctionEngine<T>,
        predictor: Arc<dyn Predictor>,
        random: Arc<dyn RandomSource>,
        shutdown: CancellationToken,
        auction_id: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<AuctionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let driver = Self {
            engine: Arc::new(RwLock::new(engine)),
            predictor,
            random,
            events_tx,
            shutdown,
            auction_id: auction_id.into(),
        };
        (driver, events_rx)
    }

    /// Shared handle to the engine, for read views from the presentation
    /// layer.
    pub fn engine(&self) -> Arc<RwLock<AuctionEngine<T>>> {
        self.engine.clone()
    }

    /// Spawn the 1 Hz clock task. The task exits once the auction ends or
    /// the shutdown token fires; after a `reset` call `start_clock` again.
    pub fn start_clock(&self) -> JoinHandle<()> {
        let driver = self.clone();
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(TICK_INTERVAL_SECS));
            // The first interval tick completes immediately; skip it so the
            // countdown starts a full second after launch.
            interval.tick().await;
            loop {
                tokio::select! {
                    () = driver.shutdown.cancelled() => {
                        info!("Clock task shutting down");
                        break;
                    }
                    _ = interval.tick() => {}
                }

                let ended = {
                    let mut engine = driver.engine.write();
                    engine.tick();
                    engine.status() == AuctionStatus::Ended
                };
                driver.forward_events();
                if ended {
                    debug!("Auction ended, clock task stopping");
                    break;
                }
            }
        })
    }

    /// Submit a bid and, on acceptance, kick off a prediction request in the
    /// background.
    pub fn submit_bid(&self, bidder_id: &str, amount: u64) -> BidOutcome {
        let outcome = self.engine.write().submit_bid(bidder_id, amount);
        self.forward_events();

        if outcome.is_accepted() {
            let driver = self.clone();
            tokio::spawn(async move {
                driver.request_prediction().await;
            });
        }
        outcome
    }

    /// Abandon the current run and start over with `new_config`.
    ///
    /// Returns the status the auction had just before the reset, read under
    /// the same write lock. A clock task started for a run that was still
    /// `Running` keeps ticking the new one; a run that had already `Ended`
    /// has no live clock task, so the caller must start a fresh one.
    pub fn reset(&self, new_config: AuctionConfig) -> AuctionResult<AuctionStatus> {
        let mut engine = self.engine.write();
        let previous = engine.status();
        engine.reset(new_config)?;
        Ok(previous)
    }

    /// Ask the prediction collaborator about one automated bidder that has
    /// no live annotation.
    ///
    /// Failures and timeouts are absorbed here: they log at debug and leave
    /// the bidder unannotated. Completions arriving after a reset or after
    /// the auction ended are discarded by the engine's generation guard.
    /// Returns whether an annotation was applied.
    pub async fn request_prediction(&self) -> bool {
        let (input, generation) = {
            let engine = self.engine.read();
            if engine.status() != AuctionStatus::Running {
                return false;
            }
            let candidates = engine.annotation_candidates();
            if candidates.is_empty() {
                return false;
            }
            let bidder_id = candidates[self.random.pick_index(candidates.len())].clone();
            let input = PredictionInput {
                auction_id: self.auction_id.clone(),
                bidder_id,
                current_bid: engine.highest_bid(),
                time_remaining: engine.time_left(),
                bid_history: engine.history().to_vec(),
            };
            (input, engine.generation())
        };

        let result = tokio::time::timeout(
            Duration::from_secs(PREDICTION_TIMEOUT_SECS),
            self.predictor.predict(&input),
        )
        .await;

        let prediction = match result {
            Ok(Ok(prediction)) => prediction,
            Ok(Err(e)) => {
                debug!(bidder_id = %input.bidder_id, "Prediction failed: {e}");
                return false;
            }
            Err(_) => {
                debug!(bidder_id = %input.bidder_id, "Prediction timed out");
                return false;
            }
        };

        self.engine
            .write()
            .apply_prediction(generation, &input.bidder_id, &prediction)
    }

    fn forward_events(&self) {
        let events = self.engine.write().drain_events();
        for event in events {
            // Receiver may be gone; correctness does not depend on delivery.
            let _ = self.events_tx.send(event);
        }
    }
}
