use std::collections::{BTreeMap, BTreeSet};

use crate::exchange::Exchange;

/// The unit of merge: exchange -> sorted, duplicate-free symbol set.
///
/// Built fresh for every call; nothing persists across calls. The
/// `BTreeMap`/`BTreeSet` pair gives lexicographic, run-stable
/// iteration for free.
pub type Market = BTreeMap<Exchange, BTreeSet<String>>;

/// Folds per-exchange contributions, arriving in arbitrary completion
/// order from concurrent tasks, into one market map.
///
/// The union is commutative and idempotent: final content is
/// independent of arrival order. Only the single draining thread
/// touches this, so no locking is involved.
#[derive(Debug, Default)]
pub struct MarketAggregator {
    map: Market,
}

impl MarketAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions one contribution into the map.
    ///
    /// A first contribution creates the entry, even when empty: a
    /// supported-but-failed exchange shows up as an empty set, which
    /// callers must read as "unavailable this run".
    pub fn absorb<I>(&mut self, exchange: Exchange, symbols: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.map.entry(exchange).or_default().extend(symbols);
    }

    pub fn into_market(self) -> Market {
        self.map
    }
}
