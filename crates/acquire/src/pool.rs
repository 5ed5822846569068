//! Bounded worker pool with fail-fast termination

use cyget_errors::Error;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Number of workers used when nothing else is configured
pub const DEFAULT_WIDTH: usize = 5;

/// What a pool run produced
#[derive(Debug)]
pub struct PoolOutcome<T> {
    /// Values of jobs that finished successfully, in completion order
    pub completed: Vec<T>,
    /// First fatal error observed, or `Cancelled` for an interrupted run
    pub failure: Option<Error>,
}

impl<T> PoolOutcome<T> {
    /// Collapse into the completed values or the first failure
    ///
    /// # Errors
    ///
    /// Returns the recorded failure, if any.
    pub fn into_result(self) -> Result<Vec<T>, Error> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.completed),
        }
    }
}

/// Fixed number of workers pulling from one shared queue
///
/// The queue lock is held only to claim the next job. The first job error
/// stops every worker: queued jobs are never started and in-flight jobs
/// are aborted. An external cancellation only stops workers from claiming
/// new jobs; the abort token set with [`WorkerPool::with_abort`] also
/// aborts the jobs in flight.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    width: usize,
    abort: Option<CancellationToken>,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keep only the first failure
fn record(slot: &Mutex<Option<Error>>, err: Error) {
    let mut slot = lock(slot);
    if slot.is_none() {
        *slot = Some(err);
    }
}

impl WorkerPool {
    /// Create a pool with `width` workers (at least one)
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            abort: None,
        }
    }

    /// Abort in-flight jobs as soon as `abort` is cancelled
    #[must_use]
    pub fn with_abort(mut self, abort: CancellationToken) -> Self {
        self.abort = Some(abort);
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Run `handler` over every job
    ///
    /// A handler returning `Ok(None)` succeeded without producing a value.
    pub async fn run<J, T, F, Fut>(
        &self,
        jobs: impl IntoIterator<Item = J>,
        handler: F,
        cancel: &CancellationToken,
    ) -> PoolOutcome<T>
    where
        J: Send + 'static,
        T: Send + 'static,
        F: Fn(J) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<T>, Error>> + Send,
    {
        let queue: Arc<Mutex<VecDeque<J>>> = Arc::new(Mutex::new(jobs.into_iter().collect()));
        let results: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
        let failure: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));
        let fatal = self
            .abort
            .as_ref()
            .map_or_else(CancellationToken::new, CancellationToken::child_token);
        let handler = Arc::new(handler);

        let workers = self.width.min(lock(&queue).len());
        let mut tasks = JoinSet::new();

        for worker in 0..workers {
            let queue = Arc::clone(&queue);
            let results = Arc::clone(&results);
            let failure = Arc::clone(&failure);
            let handler = Arc::clone(&handler);
            let fatal = fatal.clone();
            let cancel = cancel.clone();

            tasks.spawn(async move {
                loop {
                    if fatal.is_cancelled() || cancel.is_cancelled() {
                        break;
                    }
                    // Claim a job; the guard is dropped before the job runs
                    let Some(job) = lock(&queue).pop_front() else {
                        break;
                    };

                    match (*handler)(job).await {
                        Ok(Some(value)) => lock(&results).push(value),
                        Ok(None) => {}
                        Err(err) => {
                            tracing::debug!(worker, error = %err, "job failed, stopping pool");
                            record(&failure, err);
                            fatal.cancel();
                            break;
                        }
                    }
                }
            });
        }

        loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    None => break,
                    Some(Err(err)) if err.is_panic() => {
                        record(&failure, Error::internal(format!("download worker panicked: {err}")));
                        fatal.cancel();
                    }
                    Some(_) => {}
                },
                () = fatal.cancelled() => {
                    tasks.abort_all();
                    while tasks.join_next().await.is_some() {}
                    break;
                }
            }
        }

        let mut failure = lock(&failure).take();
        // Without a recorded failure, a fired fatal token means an external abort
        let interrupted =
            fatal.is_cancelled() || (cancel.is_cancelled() && !lock(&queue).is_empty());
        if failure.is_none() && interrupted {
            failure = Some(Error::Cancelled);
        }

        let completed = std::mem::take(&mut *lock(&results));
        PoolOutcome { completed, failure }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_all_jobs_complete() {
        let outcome = WorkerPool::default()
            .run(0..20u32, |n| async move { Ok(Some(n * 2)) }, &CancellationToken::new())
            .await;

        let mut values = outcome.into_result().unwrap();
        values.sort_unstable();
        assert_eq!(values, (0..20).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_width_bounds_concurrency() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let (a, p) = (Arc::clone(&active), Arc::clone(&peak));
        let outcome = WorkerPool::new(3)
            .run(
                0..12,
                move |_: i32| {
                    let active = Arc::clone(&a);
                    let peak = Arc::clone(&p);
                    async move {
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        active.fetch_sub(1, Ordering::SeqCst);
                        Ok(None::<()>)
                    }
                },
                &CancellationToken::new(),
            )
            .await;

        assert!(outcome.failure.is_none());
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_in_flight() {
        let outcome = WorkerPool::new(2)
            .run(
                [0u64, 1, 2, 3],
                |n| async move {
                    match n {
                        // Would never finish without an abort
                        0 => {
                            tokio::time::sleep(Duration::from_secs(3600)).await;
                            Ok(Some(n))
                        }
                        1 => Err(Error::internal("boom")),
                        _ => Ok(Some(n)),
                    }
                },
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(outcome.failure, Some(Error::Internal(_))));
        assert!(outcome.completed.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_stops_dequeue() {
        let cancel = CancellationToken::new();
        let started = Arc::new(AtomicUsize::new(0));

        let (c, s) = (cancel.clone(), Arc::clone(&started));
        let outcome = WorkerPool::new(1)
            .run(
                0..5,
                move |n: i32| {
                    s.fetch_add(1, Ordering::SeqCst);
                    if n == 1 {
                        c.cancel();
                    }
                    async move { Ok(Some(n)) }
                },
                &cancel,
            )
            .await;

        // The job that observed the interrupt still finishes
        assert_eq!(outcome.completed, vec![0, 1]);
        assert_eq!(started.load(Ordering::SeqCst), 2);
        assert!(matches!(outcome.failure, Some(Error::Cancelled)));
    }

    #[tokio::test]
    async fn test_abort_stops_in_flight_jobs() {
        let abort = CancellationToken::new();
        let trigger = abort.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let outcome = WorkerPool::new(2)
            .with_abort(abort.clone())
            .run(
                0..4u64,
                |n| async move {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(Some(n))
                },
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(outcome.failure, Some(Error::Cancelled)));
        assert!(outcome.completed.is_empty());
        assert!(abort.is_cancelled());
    }
}
