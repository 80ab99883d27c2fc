use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use once_cell::sync::Lazy;

/// Global runtime metrics for the collector.
///
/// Purpose:
/// - Track batch and task throughput
/// - Track per-task failure classes (error / timeout / cancel)
/// - Track symbol yield and rejected candidates
///
/// Design:
/// - Lock-free (Atomics)
/// - Cheap to update
/// - Safe in async + multithreaded contexts
#[derive(Default)]
pub struct RuntimeMetrics {
    // High-level
    pub batches_run: AtomicUsize,
    pub tasks_dispatched: AtomicUsize,

    // Task outcomes
    pub fetches_ok: AtomicUsize,
    pub fetch_errors: AtomicUsize,
    pub timeouts: AtomicUsize,
    pub cancellations: AtomicUsize,

    // Yield
    pub symbols_collected: AtomicUsize,
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RuntimeMetrics>> =
    Lazy::new(|| Arc::new(RuntimeMetrics::default()));
