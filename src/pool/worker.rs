use std::sync::Arc;

use tokio::sync::{Semaphore, watch};

/// Terminal classification of one task. Exactly one per task.
#[derive(Debug)]
pub enum Outcome<V> {
    /// The task ran to completion and produced a value.
    Success(V),

    /// The task body raised; the cause is captured at the task
    /// boundary and never re-raised out of the batch call.
    ExecutionFailure(String),

    /// The pool was stopped before the task finished.
    Cancelled,

    /// The task exceeded the per-task deadline and was abandoned.
    TimedOut,
}

impl<V> Outcome<V> {
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Outcome::Success(_) => None,
            Outcome::ExecutionFailure(_) => Some(FailureKind::ExecutionFailure),
            Outcome::Cancelled => Some(FailureKind::Cancelled),
            Outcome::TimedOut => Some(FailureKind::TimedOut),
        }
    }
}

/// The three non-success outcome classes, as seen by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ExecutionFailure,
    Cancelled,
    TimedOut,
}

/// Pluggable per-batch failure policy.
///
/// Given the originating operand and the failure class, supplies the
/// value substituted for the missing result. This is what confines
/// "one exchange unreachable" to that exchange: the batch always
/// completes with a best-effort partial result.
///
/// Implementations must be pure; they run on the draining thread.
pub trait OutcomeHandler<T, V>: Send + Sync {
    fn on_failure(&self, operand: &T, kind: FailureKind) -> V;
}

/// Default policy: substitute an empty collection.
pub struct EmptyDefault;

impl<T, V: Default> OutcomeHandler<T, V> for EmptyDefault {
    fn on_failure(&self, _operand: &T, _kind: FailureKind) -> V {
        V::default()
    }
}

/// Fixed-width parallel execution substrate.
///
/// Width is fixed for the pool's lifetime, not adaptive; batches
/// larger than the width simply queue on the permit set. The pool is
/// constructed once, reused across many batches, and released
/// explicitly with `stop`.
///
/// THREADING:
/// - Shared across tasks behind `Arc` internals
/// - `stop` may race with an in-flight batch; queued tasks resolve
///   `Cancelled`, running tasks are abandoned best-effort
pub struct WorkerPool {
    width: usize,
    permits: Arc<Semaphore>,
    shutdown_tx: watch::Sender<bool>,
}

impl WorkerPool {
    pub fn new(width: usize) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            width: width.max(1),
            permits: Arc::new(Semaphore::new(width.max(1))),
            shutdown_tx,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Stops accepting new work and cancels whatever is still queued.
    ///
    /// Idempotent, and safe with no batch in flight. Cancellation is
    /// best-effort: a network call already on the wire may run to its
    /// own end; the runner merely stops waiting on its result.
    pub fn stop(&self) {
        self.permits.close();
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.permits.is_closed()
    }

    pub(crate) fn permits(&self) -> Arc<Semaphore> {
        Arc::clone(&self.permits)
    }

    pub(crate) fn shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped_to_at_least_one() {
        assert_eq!(WorkerPool::new(0).width(), 1);
        assert_eq!(WorkerPool::new(100).width(), 100);
    }

    #[test]
    fn stop_is_idempotent() {
        let pool = WorkerPool::new(4);
        assert!(!pool.is_stopped());

        pool.stop();
        pool.stop();
        assert!(pool.is_stopped());
    }

    #[test]
    fn empty_default_substitutes_an_empty_collection() {
        let handler = EmptyDefault;
        let value: Vec<String> =
            OutcomeHandler::<&str, _>::on_failure(&handler, &"NYSE", FailureKind::TimedOut);
        assert!(value.is_empty());
    }

    #[test]
    fn failure_kind_classification() {
        assert_eq!(Outcome::<()>::Cancelled.failure_kind(), Some(FailureKind::Cancelled));
        assert_eq!(Outcome::<()>::TimedOut.failure_kind(), Some(FailureKind::TimedOut));
        assert_eq!(
            Outcome::<()>::ExecutionFailure("boom".into()).failure_kind(),
            Some(FailureKind::ExecutionFailure)
        );
        assert!(Outcome::Success(()).failure_kind().is_none());
    }
}
