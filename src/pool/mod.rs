/// Pool module
///
/// This module groups all logic responsible for:
/// - The fixed-width parallel execution substrate
/// - Per-batch orchestration (fan-out, drain, failure policy)
/// - Outcome classification and default substitution
///
/// The pool layer sits between:
/// - The downloader facade (one batch per call)
/// - Arbitrary blocking units of work (network fetches)
///
/// Design notes:
/// - Exchange-specific logic MUST NOT live here; operands are opaque
/// - One task owns exactly one terminal outcome, no automatic retries
/// - Failures are isolated per task; the batch always resolves
pub mod runner;
pub mod worker;

pub use runner::BatchRunner;
pub use worker::{EmptyDefault, FailureKind, Outcome, OutcomeHandler, WorkerPool};
