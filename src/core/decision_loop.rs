// Fetch → compare → act → report loop

use std::future::Future;
use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::clients::PriceFeed;
use crate::core::comparator::{compare, signal_for};
use crate::core::ledger::Ledger;
use crate::reporter::Reporter;
use crate::types::{BotStatus, Comparison, Snapshot, StopReason, TradeOutcome, TradeSignal};

/// Everything the loop carries from one cycle to the next.
#[derive(Debug, Clone)]
pub struct BotState {
    pub ledger: Ledger,
    pub previous: Option<Snapshot>,
    pub cycle: u64,
    pub status: BotStatus,
}

impl BotState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            previous: None,
            cycle: 0,
            status: BotStatus::Running,
        }
    }
}

/// Summary of a single cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u64,
    /// When the cycle's snapshot was taken, or when an idle cycle was asked for.
    pub taken_at: DateTime<Utc>,
    pub status: BotStatus,
    pub assets_fetched: usize,
    pub comparisons: Vec<Comparison>,
    pub trades: Vec<TradeOutcome>,
    pub capital_remaining: f64,
}

/// Turn a one-shot OS signal into a shutdown request for [`TradingBot::run`].
///
/// If the signal cannot be installed the sender is kept alive forever, so the
/// loop keeps running until its other stop conditions fire instead of
/// treating the closed channel as a shutdown.
pub async fn forward_shutdown_signal<S>(signal: S, shutdown_tx: watch::Sender<bool>)
where
    S: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("shutdown signal received, stopping after the current cycle");
            let _ = shutdown_tx.send(true);
        }
        Err(e) => {
            warn!(error = %e, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

pub struct TradingBot<F: PriceFeed, R: Reporter> {
    feed: F,
    reporter: R,
    state: BotState,
    poll_interval: Duration,
}

impl<F: PriceFeed, R: Reporter> TradingBot<F, R> {
    pub fn new(feed: F, reporter: R, ledger: Ledger, poll_interval: Duration) -> Self {
        Self::with_state(feed, reporter, BotState::new(ledger), poll_interval)
    }

    pub fn with_state(feed: F, reporter: R, state: BotState, poll_interval: Duration) -> Self {
        Self {
            feed,
            reporter,
            state,
            poll_interval,
        }
    }

    /// Run one fetch → compare → act → report cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        if let BotStatus::Stopped(_) = self.state.status {
            return self.idle_report();
        }

        if self.state.ledger.is_exhausted() {
            warn!(capital = self.state.ledger.capital_remaining(), "capital exhausted, stopping");
            self.stop(StopReason::CapitalExhausted);
            return self.idle_report();
        }

        self.state.cycle += 1;
        let cycle = self.state.cycle;

        let current = Snapshot::new(self.feed.fetch_top_assets().await);
        let mut comparisons = Vec::new();
        let mut trades = Vec::new();

        if current.is_empty() {
            info!(cycle, "no price data this cycle, skipping comparison");
        } else if let Some(previous) = &self.state.previous {
            comparisons = compare(&previous.assets, &current.assets);
            debug!(
                cycle,
                since = %previous.taken_at,
                now = %current.taken_at,
                compared = comparisons.len(),
                "comparing snapshots"
            );
            self.reporter.comparisons(&comparisons);

            for comparison in &comparisons {
                let Comparison::Priced(priced) = comparison else {
                    continue;
                };

                let outcome = match signal_for(priced) {
                    TradeSignal::Buy(price) => self.state.ledger.buy(&priced.symbol, price),
                    TradeSignal::Sell(price) => self.state.ledger.sell(&priced.symbol, price),
                    TradeSignal::Hold => continue,
                };

                self.reporter.trade(&outcome);
                trades.push(outcome);
            }
        }

        let capital_remaining = self.state.ledger.capital_remaining();
        self.reporter.balance(capital_remaining);

        let assets_fetched = current.assets.len();
        let taken_at = current.taken_at;
        if !current.is_empty() {
            self.state.previous = Some(current);
        }

        debug!(
            cycle,
            %taken_at,
            assets_fetched,
            trades = trades.len(),
            capital = capital_remaining,
            "cycle complete"
        );

        CycleReport {
            cycle,
            taken_at,
            status: self.state.status,
            assets_fetched,
            comparisons,
            trades,
            capital_remaining,
        }
    }

    /// Run cycles until capital runs out, `max_cycles` have run, or `shutdown`
    /// fires. Dropping the shutdown sender also stops the loop.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>, max_cycles: Option<u64>) -> StopReason {
        info!(
            interval_secs = self.poll_interval.as_secs_f64(),
            capital = self.state.ledger.capital_remaining(),
            allocation = self.state.ledger.per_trade_allocation(),
            "starting decision loop"
        );

        let mut cycles_run = 0u64;
        let reason = loop {
            if *shutdown.borrow() {
                break StopReason::ShutdownRequested;
            }

            let report = self.run_cycle().await;
            if let BotStatus::Stopped(reason) = report.status {
                return reason;
            }

            cycles_run += 1;
            if max_cycles.is_some_and(|max| cycles_run >= max) {
                break StopReason::CycleLimitReached;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = shutdown.changed() => {
                    break StopReason::ShutdownRequested;
                }
            }
        };

        self.stop(reason);
        reason
    }

    fn stop(&mut self, reason: StopReason) {
        if let BotStatus::Stopped(_) = self.state.status {
            return;
        }

        info!(%reason, cycles = self.state.cycle, "decision loop stopped");
        self.state.status = BotStatus::Stopped(reason);

        let previous = self.state.previous.as_ref();
        let last_price = |symbol: &str| previous.and_then(|snapshot| snapshot.price_of(symbol));
        self.reporter.stopped(reason, &self.state.ledger, &last_price);
    }

    fn idle_report(&self) -> CycleReport {
        CycleReport {
            cycle: self.state.cycle,
            taken_at: Utc::now(),
            status: self.state.status,
            assets_fetched: 0,
            comparisons: Vec::new(),
            trades: Vec::new(),
            capital_remaining: self.state.ledger.capital_remaining(),
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub fn status(&self) -> BotStatus {
        self.state.status
    }

    pub fn ledger(&self) -> &Ledger {
        &self.state.ledger
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }
}
