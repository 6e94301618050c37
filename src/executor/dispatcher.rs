//! Dispatch Loop
//!
//! Drains the task queue into the playlist shards, gating each task on a
//! simulated worker.
//!
//! ## Iteration
//! 1. **Select**: draw a random offset in `[0, worker_count)` and scan for an
//!    available worker according to the `ScanPolicy`.
//! 2. **Rotate**: advance every worker one step, promoting the selected one.
//! 3. **Apply**: if a worker was selected, dequeue the head task and apply it.
//!    Otherwise the head task stays where it is for the next iteration.
//!
//! With `ScanPolicy::ForwardOnly` an iteration can come up empty even though an
//! available worker sits before the offset. Progress still follows because the
//! rotation keeps returning workers to AVAILABLE.

use super::applier::apply_task;
use super::pool::WorkerPool;
use super::queue::TaskQueue;
use super::types::{DispatchReport, ScanPolicy, Step, WorkerId};
use crate::error::{Result, ShardError};
use crate::storage::memory::ShardedCollection;
use rand::Rng;

pub struct Dispatcher<R> {
    pool: WorkerPool,
    scan_policy: ScanPolicy,
    rng: R,
}

impl<R: Rng> Dispatcher<R> {
    pub fn new(pool: WorkerPool, scan_policy: ScanPolicy, rng: R) -> Self {
        Self {
            pool,
            scan_policy,
            rng,
        }
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Picks a candidate worker from a fresh random offset.
    pub fn select_worker(&mut self) -> Option<WorkerId> {
        if self.pool.is_empty() {
            return None;
        }
        let offset = self.rng.gen_range(0..self.pool.len());
        let candidate = self.pool.find_available_from(offset, self.scan_policy);
        tracing::debug!("Scan from offset {} selected {:?}", offset, candidate);
        candidate
    }

    /// Runs one select/rotate/apply iteration.
    pub fn step(
        &mut self,
        queue: &mut TaskQueue,
        playlists: &mut ShardedCollection,
    ) -> Result<Step> {
        if queue.is_empty() {
            return Ok(Step::Drained);
        }

        let candidate = self.select_worker();
        self.pool.rotate(candidate);

        let Some(worker) = candidate else {
            tracing::trace!("No available worker this cycle, {} tasks waiting", queue.len());
            return Ok(Step::Idle);
        };

        match queue.pop() {
            Some(task) => {
                tracing::debug!(
                    "Worker {} takes {} for playlist {}",
                    worker,
                    task.operation.as_str(),
                    task.id
                );
                let outcome = apply_task(worker, task, playlists)?;
                Ok(Step::Applied { worker, outcome })
            }
            None => Ok(Step::Drained),
        }
    }

    /// Drains the queue completely. The first failing task aborts the run.
    pub fn run(
        &mut self,
        queue: &mut TaskQueue,
        playlists: &mut ShardedCollection,
    ) -> Result<DispatchReport> {
        if self.pool.is_empty() && !queue.is_empty() {
            return Err(ShardError::InvalidConfig(
                "cannot dispatch tasks without workers".to_string(),
            ));
        }

        tracing::info!(
            "Dispatching {} tasks across {} workers ({:?} scan)",
            queue.len(),
            self.pool.len(),
            self.scan_policy
        );

        let mut report = DispatchReport::default();
        loop {
            match self.step(queue, playlists)? {
                Step::Applied { outcome, .. } => {
                    report.attempts += 1;
                    report.record(outcome);
                }
                Step::Idle => {
                    report.attempts += 1;
                    report.idle_cycles += 1;
                }
                Step::Drained => break,
            }
        }

        tracing::info!(
            "Queue drained: {} applied in {} attempts ({} idle)",
            report.applied(),
            report.attempts,
            report.idle_cycles
        );
        Ok(report)
    }
}
