//! Headless terminal frontend for the auction simulator.
//!
//! Reads the auction configuration from `GAVEL_*` environment variables,
//! runs the simulation, and accepts bid commands on stdin:
//!
//! ```text
//! bid <amount>     place a bid as the human participant
//! quick            bid the minimum acceptable amount
//! status           leaderboard and countdown
//! history          the bid ledger, most recent first
//! currency <code>  switch display currency (USD, EUR, NGN)
//! restart          abandon the run and start over with the same config
//! quit             exit
//! ```

use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gavel::currency::{convert, format_amount};
use gavel::{
    AuctionConfig, AuctionDriver, AuctionEngine, AuctionEvent, AuctionStatus, BidOutcome,
    Currency, HeuristicPredictor, RejectReason, SystemTimeProvider, ThreadRng, USER_BIDDER_ID,
};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn config_from_env() -> AuctionConfig {
    let defaults = AuctionConfig::default();
    AuctionConfig {
        num_bidders: env_parse("GAVEL_BIDDERS", defaults.num_bidders),
        currency: env_parse("GAVEL_CURRENCY", defaults.currency),
        min_bid: env_parse("GAVEL_MIN_BID", defaults.min_bid),
        bid_increment: env_parse("GAVEL_INCREMENT", defaults.bid_increment),
        duration_secs: env_parse("GAVEL_DURATION", defaults.duration_secs),
    }
}

/// Format an engine amount in the chosen display currency.
fn display(amount: u64, base: Currency, display_currency: Currency) -> String {
    format_amount(convert(amount, base, display_currency), display_currency)
}

fn print_event(event: &AuctionEvent, base: Currency, display_currency: Currency) {
    match event {
        AuctionEvent::BidAccepted { bidder_name, amount } => {
            println!(
                ">> New bid: {bidder_name} bid {}",
                display(*amount, base, display_currency)
            );
        }
        AuctionEvent::TimeThreshold { remaining_secs } => {
            println!(">> {remaining_secs} seconds remaining!");
        }
        AuctionEvent::Ended { winner } => match winner {
            Some((name, amount)) => println!(
                ">> Auction ended! {name} won with {}",
                display(*amount, base, display_currency)
            ),
            None => println!(">> Auction ended with no bids."),
        },
    }
}

fn print_status(driver: &AuctionDriver<SystemTimeProvider>, display_currency: Currency) {
    let engine = driver.engine();
    let engine = engine.read();
    let base = engine.config().currency;
    let time_left = engine.time_left();
    println!(
        "-- {} | current bid {} | min next {} | {}:{:02} left",
        match engine.status() {
            AuctionStatus::Running => "RUNNING",
            AuctionStatus::Ended => "ENDED",
        },
        display(engine.highest_bid(), base, display_currency),
        display(engine.minimum_next_bid(), base, display_currency),
        time_left / 60,
        time_left % 60,
    );
    for bidder in engine.leaderboard() {
        let bid = if bidder.current_bid > 0 {
            display(bidder.current_bid, base, display_currency)
        } else {
            "-".to_string()
        };
        let mark = if bidder.is_winning { " [winning]" } else { "" };
        let note = bidder
            .annotation
            .as_ref()
            .map(|a| format!("  ({} {:.0}%)", a.action, a.confidence * 100.0))
            .unwrap_or_default();
        println!("   {:<12} {bid}{mark}{note}", bidder.name);
    }
}

fn print_history(driver: &AuctionDriver<SystemTimeProvider>, display_currency: Currency) {
    let engine = driver.engine();
    let engine = engine.read();
    let base = engine.config().currency;
    if engine.history().is_empty() {
        println!("-- No bids yet.");
        return;
    }
    // Canonical order is oldest first; render most recent first.
    for bid in engine.history().iter().rev() {
        let name = engine
            .bidder(&bid.bidder_id)
            .map(|b| b.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        println!(
            "   {name:<12} {} @ {}",
            display(bid.amount, base, display_currency),
            bid.timestamp_ms
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    info!("Starting auction simulator");

    let config = config_from_env();
    let base_currency = config.currency;
    let engine = AuctionEngine::new(config.clone())?;

    let shutdown = CancellationToken::new();
    let (driver, mut events_rx) = AuctionDriver::new(
        engine,
        Arc::new(HeuristicPredictor::new(ThreadRng::new())),
        Arc::new(ThreadRng::new()),
        shutdown.clone(),
        "lot-001",
    );

    let display_currency = Arc::new(RwLock::new(base_currency));
    let printer_currency = display_currency.clone();
    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            print_event(&event, base_currency, *printer_currency.read());
        }
    });

    let _ = driver.start_clock();
    println!(
        "Auction open: starting bid {}, increment {}, {} bidders, {}s on the clock.",
        format_amount(config.min_bid as f64, base_currency),
        format_amount(config.bid_increment as f64, base_currency),
        config.num_bidders,
        config.duration_secs
    );
    println!("Commands: bid <amount>, quick, status, history, currency <code>, restart, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("bid") => {
                let Some(amount) = parts.next().and_then(|s| s.parse::<u64>().ok()) else {
                    println!("Usage: bid <amount>");
                    continue;
                };
                report_outcome(driver.submit_bid(USER_BIDDER_ID, amount), base_currency, *display_currency.read());
            }
            Some("quick") => {
                let amount = driver.engine().read().minimum_next_bid();
                report_outcome(driver.submit_bid(USER_BIDDER_ID, amount), base_currency, *display_currency.read());
            }
            Some("status") => print_status(&driver, *display_currency.read()),
            Some("history") => print_history(&driver, *display_currency.read()),
            Some("currency") => match parts.next().map(str::parse::<Currency>) {
                Some(Ok(currency)) => {
                    *display_currency.write() = currency;
                    println!("-- Display currency: {currency}");
                }
                _ => println!("Usage: currency <USD|EUR|NGN>"),
            },
            Some("restart") => match driver.reset(config.clone()) {
                // A clock task from a still-running auction survives the
                // reset and keeps ticking; an ended run's task has exited.
                Ok(previous) => {
                    if previous == AuctionStatus::Ended {
                        let _ = driver.start_clock();
                    }
                    println!("-- Auction restarted.");
                }
                Err(e) => warn!("Restart failed: {e}"),
            },
            Some("quit") => break,
            Some(other) => println!("Unknown command: {other}"),
            None => {}
        }
    }

    info!("Shutting down");
    shutdown.cancel();
    Ok(())
}

fn report_outcome(outcome: BidOutcome, base: Currency, display_currency: Currency) {
    match outcome {
        BidOutcome::Accepted => {}
        BidOutcome::Rejected(RejectReason::BidTooLow { minimum }) => {
            println!(
                "!! Bid too low. Minimum next bid is {}.",
                display(minimum, base, display_currency)
            );
        }
        BidOutcome::Rejected(RejectReason::AuctionClosed) => {
            println!("!! The auction has ended.");
        }
        BidOutcome::Rejected(RejectReason::UnknownBidder) => {
            println!("!! Unknown bidder.");
        }
    }
}
