//! Integration tests for the async driver: clock ticks, event forwarding,
//! and the prediction request lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use gavel::mocks::{MockPredictor, MockRandom, MockTime};
use gavel::{
    AuctionConfig, AuctionDriver, AuctionEngine, AuctionEvent, AuctionStatus, Currency,
    NumberedNames, Prediction, USER_BIDDER_ID,
};

fn short_config() -> AuctionConfig {
    AuctionConfig {
        num_bidders: 3,
        currency: Currency::Usd,
        min_bid: 1_000,
        bid_increment: 100,
        duration_secs: 60,
    }
}

fn build_driver(
    predictor: MockPredictor,
) -> (
    AuctionDriver<MockTime>,
    tokio::sync::mpsc::UnboundedReceiver<AuctionEvent>,
    MockTime,
) {
    let time = MockTime::new(1_000);
    let engine =
        AuctionEngine::with_providers(short_config(), time.clone(), Box::new(NumberedNames))
            .unwrap();
    let (driver, events_rx) = AuctionDriver::new(
        engine,
        Arc::new(predictor),
        Arc::new(MockRandom::zeros()),
        CancellationToken::new(),
        "test-auction",
    );
    (driver, events_rx, time)
}

#[tokio::test(start_paused = true)]
async fn clock_task_runs_countdown_to_end() {
    let (driver, mut events_rx, _time) = build_driver(MockPredictor::new());

    let clock = driver.start_clock();
    clock.await.unwrap();

    let engine = driver.engine();
    assert_eq!(engine.read().status(), AuctionStatus::Ended);
    assert!(engine.read().winner().is_none());

    let mut saw_ended = false;
    while let Ok(event) = events_rx.try_recv() {
        if matches!(event, AuctionEvent::Ended { winner: None }) {
            saw_ended = true;
        }
    }
    assert!(saw_ended);
}

#[tokio::test(start_paused = true)]
async fn reset_reports_status_the_run_had_before_it() {
    let (driver, _events_rx, _time) = build_driver(MockPredictor::new());

    // Mid-run: the existing clock task outlives the reset, so the caller
    // must not start another one.
    assert_eq!(
        driver.reset(short_config()).unwrap(),
        AuctionStatus::Running
    );

    // Run the clock down; the task exits, and the next reset says so.
    driver.start_clock().await.unwrap();
    assert_eq!(driver.reset(short_config()).unwrap(), AuctionStatus::Ended);
    assert_eq!(driver.engine().read().status(), AuctionStatus::Running);
}

#[tokio::test]
async fn accepted_bid_forwards_event() {
    let (driver, mut events_rx, _time) = build_driver(MockPredictor::new());

    assert!(driver.submit_bid(USER_BIDDER_ID, 1_100).is_accepted());
    let event = events_rx.recv().await.unwrap();
    assert_eq!(
        event,
        AuctionEvent::BidAccepted {
            bidder_name: "You".to_string(),
            amount: 1_100,
        }
    );
}

#[tokio::test]
async fn rejected_bid_forwards_nothing() {
    let (driver, mut events_rx, _time) = build_driver(MockPredictor::new());

    assert!(!driver.submit_bid(USER_BIDDER_ID, 1_050).is_accepted());
    assert!(events_rx.try_recv().is_err());
}

#[tokio::test]
async fn prediction_attaches_annotation_to_selected_bidder() {
    let predictor = MockPredictor::new();
    predictor.queue(Prediction {
        predicted_action: "Place a higher bid".into(),
        confidence: 0.8,
        reason: "test".into(),
    });
    let (driver, _events_rx, _time) = build_driver(predictor.clone());

    // MockRandom::zeros picks the first candidate, bidder-0
    assert!(driver.request_prediction().await);

    let engine = driver.engine();
    let annotation = engine
        .read()
        .bidder("bidder-0")
        .unwrap()
        .annotation
        .clone()
        .unwrap();
    assert_eq!(annotation.action, "Place a higher bid");

    let calls = predictor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bidder_id, "bidder-0");
    assert_eq!(calls[0].auction_id, "test-auction");
}

#[tokio::test]
async fn prediction_failure_is_absorbed() {
    let predictor = MockPredictor::new();
    predictor.set_fail_mode(true);
    let (driver, _events_rx, _time) = build_driver(predictor);

    assert!(!driver.request_prediction().await);

    let engine = driver.engine();
    let guard = engine.read();
    assert!(guard
        .snapshot()
        .bidders
        .iter()
        .all(|b| b.annotation.is_none()));
    // The auction itself is untouched
    assert_eq!(guard.status(), AuctionStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn prediction_timeout_is_absorbed() {
    let predictor = MockPredictor::new();
    predictor.set_delay(Duration::from_secs(30)); // beyond the 10 s budget
    let (driver, _events_rx, _time) = build_driver(predictor);

    assert!(!driver.request_prediction().await);
    let engine = driver.engine();
    assert!(engine
        .read()
        .bidder("bidder-0")
        .unwrap()
        .annotation
        .is_none());
}

#[tokio::test(start_paused = true)]
async fn stale_prediction_after_reset_is_dropped() {
    let predictor = MockPredictor::new();
    predictor.set_delay(Duration::from_secs(2));
    let (driver, _events_rx, _time) = build_driver(predictor);

    let request = {
        let driver = driver.clone();
        tokio::spawn(async move { driver.request_prediction().await })
    };
    // Let the request reach the collaborator call, then reset under it
    tokio::task::yield_now().await;
    driver.reset(short_config()).unwrap();

    assert!(!request.await.unwrap());
    let engine = driver.engine();
    assert!(engine
        .read()
        .snapshot()
        .bidders
        .iter()
        .all(|b| b.annotation.is_none()));
}

#[tokio::test(start_paused = true)]
async fn prediction_after_auction_end_is_dropped() {
    let predictor = MockPredictor::new();
    predictor.set_delay(Duration::from_secs(2));
    let (driver, _events_rx, _time) = build_driver(predictor);

    let request = {
        let driver = driver.clone();
        tokio::spawn(async move { driver.request_prediction().await })
    };
    tokio::task::yield_now().await;
    // End the auction while the prediction is in flight
    {
        let engine = driver.engine();
        let mut guard = engine.write();
        for _ in 0..60 {
            guard.tick();
        }
        assert_eq!(guard.status(), AuctionStatus::Ended);
    }

    assert!(!request.await.unwrap());
}

#[tokio::test]
async fn no_request_when_every_bidder_annotated() {
    let predictor = MockPredictor::new();
    let (driver, _events_rx, _time) = build_driver(predictor.clone());

    {
        let engine = driver.engine();
        let mut guard = engine.write();
        let generation = guard.generation();
        for id in guard.annotation_candidates() {
            guard.apply_prediction(generation, &id, &Prediction::unavailable());
        }
    }

    assert!(!driver.request_prediction().await);
    assert_eq!(predictor.call_count(), 0);
}
