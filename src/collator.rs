use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{CollectorError, Result};
use crate::exchange::Exchange;
use crate::market::{Market, MarketAggregator};
use crate::util;

/// Network-free alternative source: derives a market map from an
/// on-disk directory tree.
///
/// Expected layout: one subdirectory per exchange code, one data file
/// per symbol. The filename convention appends date-range and
/// frequency suffixes after the symbol, separated by `_`:
///
/// ```text
/// NYSE/A.csv
/// NYSE/BAC_d.csv
/// NASDAQ/INTC_20100101-20100201_m.csv
/// ```
///
/// Inverting the convention keeps everything before the first `_` of
/// the file stem. Unknown subdirectories, filtered-out exchanges and
/// files that normalize to nothing are skipped, never raised.
pub struct LocalCollator {
    root: PathBuf,
}

impl LocalCollator {
    /// Fails fast when `root` is missing or is a regular file; both
    /// are configuration errors, not per-entry failures.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            return Err(CollectorError::Config(format!(
                "collation root '{}' does not exist",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(CollectorError::Config(format!(
                "collation root '{}' is not a directory",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    /// Collates every exchange directory under the root.
    pub fn collate(&self) -> Result<Market> {
        self.collate_inner(None)
    }

    /// Collates only the given exchanges; directories outside the
    /// filter are excluded, requested-but-absent exchanges likewise.
    pub fn collate_filtered(&self, exchanges: &[Exchange]) -> Result<Market> {
        self.collate_inner(Some(exchanges))
    }

    fn collate_inner(&self, filter: Option<&[Exchange]>) -> Result<Market> {
        let mut aggregator = MarketAggregator::new();

        let entries = fs::read_dir(&self.root).map_err(|e| {
            CollectorError::Config(format!(
                "cannot read collation root '{}': {e}",
                self.root.display()
            ))
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Ok(exchange) = name.parse::<Exchange>() else {
                debug!("directory '{name}' is not an exchange code, skipping");
                continue;
            };
            if filter.is_some_and(|wanted| !wanted.contains(&exchange)) {
                continue;
            }

            aggregator.absorb(exchange, Self::symbols_in(&path));
        }

        Ok(aggregator.into_market())
    }

    /// Derives symbols from the data files of one exchange directory.
    fn symbols_in(dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                let stem = path.file_stem()?.to_str()?;
                if stem.starts_with('.') {
                    return None;
                }

                // Date-range / frequency suffixes live after the first
                // underscore and are discarded.
                let symbol = stem.split('_').next()?;
                util::normalize_symbol(symbol)
            })
            .collect()
    }
}
