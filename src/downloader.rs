use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use log::{debug, info, warn};

use crate::catalog;
use crate::config::Config;
use crate::error::{CollectorError, Result};
use crate::exchange::Exchange;
use crate::fetch::{HttpSource, SymbolSource};
use crate::market::{Market, MarketAggregator};
use crate::metrics::METRICS;
use crate::pool::{BatchRunner, EmptyDefault, Outcome, OutcomeHandler, WorkerPool};
use crate::transform::ColumnTransform;

/// One fetch-and-parse unit, bound to one exchange.
#[derive(Debug, Clone)]
struct FetchTask {
    exchange: Exchange,
    url: &'static str,
    transform: ColumnTransform,
}

/// Facade over catalog, pool and aggregator: resolves recipes, fans
/// fetch+transform tasks onto the fixed-width pool, drains outcomes
/// under the per-task deadline, applies the failure policy and folds
/// everything into one market map.
///
/// Constructed once and reused across many calls; the pool is
/// released explicitly with `stop`. Each call builds a fresh map;
/// nothing persists between calls.
pub struct SymbolDownloader {
    runner: BatchRunner,
    source: Arc<dyn SymbolSource>,
    handler: Arc<dyn OutcomeHandler<Exchange, BTreeSet<String>>>,
}

impl SymbolDownloader {
    /// Production wiring: shared HTTP client, empty-set failure policy.
    pub fn new(config: &Config) -> Result<Self> {
        let source = Arc::new(HttpSource::new(&config.http)?);
        Ok(Self::with_source(config, source))
    }

    /// Wires an alternative fetch seam; tests use this to script
    /// latency and failures without a network.
    pub fn with_source(config: &Config, source: Arc<dyn SymbolSource>) -> Self {
        let pool = Arc::new(WorkerPool::new(config.pool.width));
        let runner = BatchRunner::new(
            pool,
            Duration::from_millis(config.pool.task_deadline_ms),
            Duration::from_millis(config.pool.drain_grace_ms()),
        );

        Self {
            runner,
            source,
            handler: Arc::new(EmptyDefault),
        }
    }

    /// Replaces the per-batch failure policy.
    pub fn with_handler(
        mut self,
        handler: Arc<dyn OutcomeHandler<Exchange, BTreeSet<String>>>,
    ) -> Self {
        self.handler = handler;
        self
    }

    /// Fetches listings for the requested exchanges and merges them
    /// into one market map.
    ///
    /// - An empty request is a configuration error, raised before any
    ///   dispatch.
    /// - Unsupported exchanges are dropped silently, never raised and
    ///   never present as keys.
    /// - A supported exchange whose fetch fails maps to the handler's
    ///   default value; the batch always resolves.
    pub async fn download(&self, exchanges: &[Exchange]) -> Result<Market> {
        if exchanges.is_empty() {
            return Err(CollectorError::Config(
                "exchange list must not be empty".to_string(),
            ));
        }

        let mut seen: BTreeSet<Exchange> = BTreeSet::new();
        let mut tasks: Vec<FetchTask> = Vec::with_capacity(exchanges.len());

        for &exchange in exchanges {
            if !seen.insert(exchange) {
                continue;
            }

            let Some(source) = catalog::lookup(exchange) else {
                debug!("exchange {exchange} is not supported, skipping");
                continue;
            };

            tasks.push(FetchTask {
                exchange,
                url: source.url,
                transform: ColumnTransform::for_source(source)?,
            });
        }

        METRICS.batches_run.fetch_add(1, Ordering::Relaxed);
        METRICS.tasks_dispatched.fetch_add(tasks.len(), Ordering::Relaxed);

        let fetcher = Arc::clone(&self.source);
        let outcomes = self
            .runner
            .run(tasks, move |task| {
                let fetcher = Arc::clone(&fetcher);
                let url = task.url;
                let transform = task.transform.clone();

                async move {
                    let body = fetcher.fetch(url).await?;
                    let mut symbols = BTreeSet::new();
                    for line in body.lines() {
                        symbols.extend(transform.transform(line));
                    }
                    Ok(symbols)
                }
            })
            .await;

        // Merging is serial: only this drain path touches the map.
        let mut aggregator = MarketAggregator::new();
        for (task, outcome) in outcomes {
            match outcome {
                Outcome::Success(symbols) => {
                    METRICS.fetches_ok.fetch_add(1, Ordering::Relaxed);
                    METRICS
                        .symbols_collected
                        .fetch_add(symbols.len(), Ordering::Relaxed);
                    debug!("{}: {} symbols", task.exchange, symbols.len());
                    aggregator.absorb(task.exchange, symbols);
                }
                failed => {
                    let kind = failed.failure_kind().expect("non-success outcome");
                    match failed {
                        Outcome::ExecutionFailure(cause) => {
                            METRICS.fetch_errors.fetch_add(1, Ordering::Relaxed);
                            warn!("{} fetch failed: {cause}", task.exchange);
                        }
                        Outcome::TimedOut => {
                            METRICS.timeouts.fetch_add(1, Ordering::Relaxed);
                            warn!("{} timed out, abandoning", task.exchange);
                        }
                        Outcome::Cancelled => {
                            METRICS.cancellations.fetch_add(1, Ordering::Relaxed);
                            warn!("{} cancelled", task.exchange);
                        }
                        Outcome::Success(_) => unreachable!(),
                    }

                    aggregator.absorb(task.exchange, self.handler.on_failure(&task.exchange, kind));
                }
            }
        }

        let market = aggregator.into_market();
        info!(
            "batch resolved: {} exchanges, {} symbols",
            market.len(),
            market.values().map(BTreeSet::len).sum::<usize>()
        );

        Ok(market)
    }

    /// Same contract as `download`, accepting raw codes.
    ///
    /// Codes that do not parse are treated exactly like unsupported
    /// exchanges: dropped silently.
    pub async fn download_codes<S>(&self, codes: &[S]) -> Result<Market>
    where
        S: AsRef<str>,
    {
        if codes.is_empty() {
            return Err(CollectorError::Config(
                "exchange code list must not be empty".to_string(),
            ));
        }

        let exchanges: Vec<Exchange> = codes
            .iter()
            .filter_map(|code| match code.as_ref().parse::<Exchange>() {
                Ok(exchange) => Some(exchange),
                Err(_) => {
                    debug!("unknown exchange code '{}', skipping", code.as_ref());
                    None
                }
            })
            .collect();

        if exchanges.is_empty() {
            return Ok(Market::new());
        }

        self.download(&exchanges).await
    }

    /// Releases the pool: stops accepting batches, cancels whatever is
    /// outstanding. Idempotent.
    pub fn stop(&self) {
        self.runner.stop();
    }
}
