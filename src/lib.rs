// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - config:     Configuration structs loaded from JSON
// - error:      Error taxonomy (configuration vs transport)
// - exchange:   Closed enumeration of listing venues
// - catalog:    Static exchange -> fetch recipe table
// - transform:  Line-to-symbol extraction and normalization
// - market:     Market map and order-independent aggregation
// - pool:       Fixed-width pool, batch runner, outcome handling
// - fetch:      HTTP seam (trait + reqwest implementation)
// - downloader: Public facade (download / download_codes / stop)
// - collator:   Filesystem-based alternative source
// - util:       Shared helpers (normalization, RFC2396 check)
// - metrics:    Lock-free runtime counters
//
pub mod catalog;
pub mod collator;
pub mod config;
pub mod downloader;
pub mod error;
pub mod exchange;
pub mod fetch;
pub mod market;
pub mod metrics;
pub mod pool;
pub mod transform;
pub mod util;

pub use collator::LocalCollator;
pub use config::Config;
pub use downloader::SymbolDownloader;
pub use error::CollectorError;
pub use exchange::Exchange;
pub use market::Market;
