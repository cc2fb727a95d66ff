//! Mock prediction service for testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::predict::{Prediction, PredictionInput, Predictor};

/// Mock predictor with queued responses, a failure mode, and an optional
/// artificial delay for timeout and race tests.
#[derive(Clone)]
pub struct MockPredictor {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    queued: VecDeque<Prediction>,
    fail_mode: bool,
    delay: Option<Duration>,
    calls: Vec<PredictionInput>,
}

impl MockPredictor {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queued: VecDeque::new(),
                fail_mode: false,
                delay: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Queue a response; responses are returned in FIFO order. When the
    /// queue is empty a fixed default prediction is returned.
    pub fn queue(&self, prediction: Prediction) {
        self.inner.lock().queued.push_back(prediction);
    }

    /// Make every subsequent call fail.
    pub fn set_fail_mode(&self, fail: bool) {
        self.inner.lock().fail_mode = fail;
    }

    /// Delay every subsequent call by `delay` before responding.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().delay = Some(delay);
    }

    /// Inputs of every call made so far.
    pub fn calls(&self) -> Vec<PredictionInput> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

impl Default for MockPredictor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    async fn predict(&self, input: &PredictionInput) -> Result<Prediction> {
        let (delay, fail, next) = {
            let mut inner = self.inner.lock();
            inner.calls.push(input.clone());
            (inner.delay, inner.fail_mode, inner.queued.pop_front())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            bail!("Simulated prediction failure");
        }
        Ok(next.unwrap_or(Prediction {
            predicted_action: "Wait and see".to_string(),
            confidence: 0.5,
            reason: "Mock default".to_string(),
        }))
    }
}
