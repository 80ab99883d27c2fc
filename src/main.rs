use std::fs;
use std::str::FromStr;
use std::sync::atomic::Ordering;

use symbol_batch_collector::exchange::Exchange;
use symbol_batch_collector::metrics::METRICS;
use symbol_batch_collector::{Config, SymbolDownloader};

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// This is the batch runtime for the symbol collector.
//
// Responsibilities:
// - Initialize logging
// - Load configuration
// - Run one download batch over the configured exchanges
// - Emit one `EXCHANGE,SYMBOL1,SYMBOL2,...` row per exchange
// - Release the pool
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config: Config = load_config("config.json")?;

    // --------------------------------------------------------
    // Resolve the exchange list
    //
    // An empty list in the config means "everything the catalog
    // supports". Unknown codes fail here, loudly: a typo in the
    // config should not silently shrink the batch.
    // --------------------------------------------------------
    let exchanges: Vec<Exchange> = if config.exchanges.is_empty() {
        Exchange::all().to_vec()
    } else {
        config
            .exchanges
            .iter()
            .map(|code| Exchange::from_str(code))
            .collect::<Result<_, _>>()?
    };

    let downloader = SymbolDownloader::new(&config)?;

    log::info!(
        "starting batch over {} exchanges at {}",
        exchanges.len(),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let market = downloader.download(&exchanges).await?;

    // --------------------------------------------------------
    // Emit the writer contract: one grouped row per exchange.
    // Grouping by first letter is the downstream writer's job.
    // --------------------------------------------------------
    for (exchange, symbols) in &market {
        let row: Vec<&str> = symbols.iter().map(String::as_str).collect();
        println!("{},{}", exchange, row.join(","));
    }

    println!(
        "[METRICS] batches={} dispatched={} ok={} err={} timeout={} cancelled={} symbols={}",
        METRICS.batches_run.load(Ordering::Relaxed),
        METRICS.tasks_dispatched.load(Ordering::Relaxed),
        METRICS.fetches_ok.load(Ordering::Relaxed),
        METRICS.fetch_errors.load(Ordering::Relaxed),
        METRICS.timeouts.load(Ordering::Relaxed),
        METRICS.cancellations.load(Ordering::Relaxed),
        METRICS.symbols_collected.load(Ordering::Relaxed),
    );

    downloader.stop();
    Ok(())
}

// ------------------------------------------------------------
// Configuration loader
// ------------------------------------------------------------
//
// Reads a JSON configuration file from disk and deserializes
// it into the strongly typed `Config` structure.
//
fn load_config(path: &str) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&data)?;
    Ok(cfg)
}
