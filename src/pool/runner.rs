use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::time::timeout;

use super::worker::{Outcome, WorkerPool};

/// Per-batch orchestration over the fixed-width pool.
///
/// One call to `run` builds one task per operand, fans them out onto
/// the pool, and drains completions over a multi-producer
/// single-consumer channel. The deadline bounds the wait for the
/// *next* outcome, not the whole batch: one stuck task costs at most
/// one deadline, so the worst case is batch_size x deadline, never
/// unbounded.
///
/// The runner is constructed once and reused across many batches; the
/// underlying pool is released through `stop`.
pub struct BatchRunner {
    pool: Arc<WorkerPool>,
    task_deadline: Duration,
    drain_grace: Duration,
}

impl BatchRunner {
    /// `task_deadline` bounds each task's execution; `drain_grace` pads
    /// the drain loop's per-read wait so a task that reports its own
    /// timeout always beats the backstop.
    pub fn new(pool: Arc<WorkerPool>, task_deadline: Duration, drain_grace: Duration) -> Self {
        Self {
            pool,
            task_deadline,
            drain_grace,
        }
    }

    pub fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    /// Stops the underlying pool. Idempotent.
    pub fn stop(&self) {
        self.pool.stop();
    }

    /// Runs one batch and returns outcomes in completion order, each
    /// tagged with its originating operand.
    ///
    /// GUARANTEES:
    /// - Exactly one outcome per operand.
    /// - Task-internal errors come back as `ExecutionFailure`, never
    ///   as a raised error from this call.
    /// - A task exceeding the deadline is marked `TimedOut` and
    ///   abandoned; its siblings are unaffected.
    /// - After `stop`, unfinished tasks resolve `Cancelled`; outcomes
    ///   already recorded are preserved.
    pub async fn run<T, V, F, Fut>(&self, operands: Vec<T>, task_factory: F) -> Vec<(T, Outcome<V>)>
    where
        T: Send + 'static,
        V: Send + 'static,
        F: Fn(&T) -> Fut,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let total = operands.len();
        let (tx, mut rx) = mpsc::channel::<(usize, Outcome<V>)>(total.max(1));

        for (index, operand) in operands.iter().enumerate() {
            let work = task_factory(operand);
            let permits = self.pool.permits();
            let mut shutdown = self.pool.shutdown();
            let tx = tx.clone();
            let deadline = self.task_deadline;

            tokio::spawn(async move {
                // A closed pool rejects queued work before it runs.
                let permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        let _ = tx.send((index, Outcome::Cancelled)).await;
                        return;
                    }
                };

                let outcome = tokio::select! {
                    _ = shutdown.changed() => Outcome::Cancelled,
                    finished = timeout(deadline, work) => match finished {
                        Ok(Ok(value)) => Outcome::Success(value),
                        Ok(Err(cause)) => Outcome::ExecutionFailure(cause.to_string()),
                        Err(_) => Outcome::TimedOut,
                    },
                };

                drop(permit);
                let _ = tx.send((index, outcome)).await;
            });
        }

        // The runner's sender must go away so `recv` can observe the
        // channel closing once every task has reported.
        drop(tx);

        let mut slots: Vec<Option<T>> = operands.into_iter().map(Some).collect();
        let mut completed: Vec<(usize, Outcome<V>)> = Vec::with_capacity(total);
        let read_deadline = self.task_deadline + self.drain_grace;

        while completed.len() < total {
            match timeout(read_deadline, rx.recv()).await {
                Ok(Some(report)) => completed.push(report),
                // All senders gone; whatever is missing will never report.
                Ok(None) => break,
                // Backstop: no outcome within deadline + grace.
                Err(_) => {
                    debug!("drain read deadline elapsed with {} outcomes pending", total - completed.len());
                    break;
                }
            }
        }

        let mut outcomes: Vec<(T, Outcome<V>)> = completed
            .into_iter()
            .map(|(index, outcome)| {
                let operand = slots[index].take().expect("one outcome per task");
                (operand, outcome)
            })
            .collect();

        // Tasks that never reported: cancelled if the pool was stopped
        // under us, otherwise charged as timed out.
        let stopped = self.pool.is_stopped();
        for slot in slots.iter_mut() {
            if let Some(operand) = slot.take() {
                let outcome = if stopped { Outcome::Cancelled } else { Outcome::TimedOut };
                outcomes.push((operand, outcome));
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::time::sleep;

    fn runner(width: usize, deadline_ms: u64) -> BatchRunner {
        BatchRunner::new(
            Arc::new(WorkerPool::new(width)),
            Duration::from_millis(deadline_ms),
            Duration::from_millis(250),
        )
    }

    #[tokio::test]
    async fn outcomes_arrive_in_completion_order() {
        let runner = runner(4, 5_000);

        let outcomes = runner
            .run(vec![("slow", 300u64), ("fast", 10), ("mid", 120)], |(name, delay)| {
                let name = *name;
                let delay = *delay;
                async move {
                    sleep(Duration::from_millis(delay)).await;
                    Ok(name)
                }
            })
            .await;

        let order: Vec<&str> = outcomes.iter().map(|(op, _)| op.0).collect();
        assert_eq!(order, ["fast", "mid", "slow"]);
        assert!(outcomes.iter().all(|(_, o)| matches!(o, Outcome::Success(_))));
    }

    #[tokio::test]
    async fn execution_failures_are_isolated_to_their_task() {
        let runner = runner(4, 1_000);

        let outcomes = runner
            .run(vec!["ok", "broken", "ok2"], |op| {
                let op = *op;
                async move {
                    if op == "broken" {
                        anyhow::bail!("connection refused");
                    }
                    Ok(op.len())
                }
            })
            .await;

        for (operand, outcome) in &outcomes {
            match *operand {
                "broken" => match outcome {
                    Outcome::ExecutionFailure(cause) => {
                        assert!(cause.contains("connection refused"));
                    }
                    other => panic!("expected ExecutionFailure, got {other:?}"),
                },
                _ => assert!(matches!(outcome, Outcome::Success(_))),
            }
        }
    }

    #[tokio::test]
    async fn slow_task_times_out_without_stalling_the_batch() {
        let runner = runner(4, 100);
        let started = Instant::now();

        let outcomes = runner
            .run(vec!["hung", "a", "b", "c"], |op| {
                let op = *op;
                async move {
                    if op == "hung" {
                        sleep(Duration::from_secs(60)).await;
                    }
                    Ok(op)
                }
            })
            .await;

        // Bounded by a small multiple of the per-task deadline, not by
        // the unresponsive source.
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(outcomes.len(), 4);

        for (operand, outcome) in &outcomes {
            if *operand == "hung" {
                assert!(matches!(outcome, Outcome::TimedOut));
            } else {
                assert!(matches!(outcome, Outcome::Success(_)));
            }
        }
    }

    #[tokio::test]
    async fn stopped_pool_cancels_the_whole_batch() {
        let runner = runner(4, 1_000);
        runner.stop();

        let outcomes = runner
            .run(vec![1, 2, 3], |n| {
                let n = *n;
                async move { Ok(n * 2) }
            })
            .await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|(_, o)| matches!(o, Outcome::Cancelled)));
    }

    #[tokio::test]
    async fn stop_mid_batch_cancels_unfinished_tasks() {
        let runner = Arc::new(runner(1, 5_000));
        let pool = Arc::clone(runner.pool());

        let batch = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move {
                runner
                    .run(vec!["first", "queued1", "queued2"], |op| {
                        let op = *op;
                        async move {
                            sleep(Duration::from_millis(200)).await;
                            Ok(op)
                        }
                    })
                    .await
            })
        };

        sleep(Duration::from_millis(50)).await;
        pool.stop();

        let outcomes = batch.await.unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|(_, o)| matches!(o, Outcome::Cancelled)));
    }

    #[tokio::test]
    async fn outcomes_recorded_before_stop_are_preserved() {
        let runner = Arc::new(runner(4, 60_000));
        let pool = Arc::clone(runner.pool());

        let batch = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move {
                runner
                    .run(vec![("fast", 10u64), ("slow", 10_000)], |(name, delay)| {
                        let name = *name;
                        let delay = *delay;
                        async move {
                            sleep(Duration::from_millis(delay)).await;
                            Ok(name)
                        }
                    })
                    .await
            })
        };

        sleep(Duration::from_millis(200)).await;
        pool.stop();

        let outcomes = batch.await.unwrap();
        assert_eq!(outcomes.len(), 2);

        for (operand, outcome) in &outcomes {
            match operand.0 {
                "fast" => match outcome {
                    Outcome::Success(name) => assert_eq!(*name, "fast"),
                    other => panic!("completed outcome was not preserved: {other:?}"),
                },
                _ => assert!(matches!(outcome, Outcome::Cancelled)),
            }
        }
    }

    #[tokio::test]
    async fn batches_larger_than_the_width_queue_and_complete() {
        let runner = runner(2, 1_000);
        let operands: Vec<usize> = (0..10).collect();

        let outcomes = runner
            .run(operands, |n| {
                let n = *n;
                async move {
                    sleep(Duration::from_millis(5)).await;
                    Ok(n)
                }
            })
            .await;

        assert_eq!(outcomes.len(), 10);
        assert!(outcomes.iter().all(|(_, o)| matches!(o, Outcome::Success(_))));
    }

    #[tokio::test]
    async fn empty_batch_resolves_immediately() {
        let runner = runner(4, 1_000);
        let outcomes: Vec<(u8, Outcome<u8>)> =
            runner.run(Vec::new(), |n| {
                let n = *n;
                async move { Ok(n) }
            }).await;
        assert!(outcomes.is_empty());
    }
}
