//! Simulated worker pool.
//!
//! Workers are never spawned; they are entries in a fixed-size list whose
//! state advances around a three-state ring:
//!
//! ```text
//!   AVAILABLE ──(selected)──> WORKING ──> OUT_OF_SERVICE ──> AVAILABLE
//! ```
//!
//! Every dispatch attempt performs exactly one rotation step, whether or not a
//! worker was selected.

use super::types::{ScanPolicy, Worker, WorkerId, WorkerState};

#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    /// Creates `count` workers with cyclic initial states.
    pub fn new(count: usize) -> Self {
        Self::from_states((0..count).map(WorkerState::initial_for))
    }

    /// Creates workers with explicit states, ids assigned by position.
    pub fn from_states(states: impl IntoIterator<Item = WorkerState>) -> Self {
        let workers = states
            .into_iter()
            .enumerate()
            .map(|(id, state)| Worker { id, state })
            .collect();
        Self { workers }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn states(&self) -> Vec<WorkerState> {
        self.workers.iter().map(|worker| worker.state).collect()
    }

    pub fn count(&self, state: WorkerState) -> usize {
        self.workers.iter().filter(|worker| worker.state == state).count()
    }

    /// First available worker at or after `offset` under `policy`.
    pub fn find_available_from(&self, offset: usize, policy: ScanPolicy) -> Option<WorkerId> {
        let offset = offset.min(self.workers.len());
        let (before, after) = self.workers.split_at(offset);

        let is_available = |worker: &&Worker| worker.state == WorkerState::Available;
        let found = match policy {
            ScanPolicy::ForwardOnly => after.iter().find(is_available),
            ScanPolicy::Wrapping => after.iter().chain(before.iter()).find(is_available),
        };
        found.map(|worker| worker.id)
    }

    /// Advances every worker one step around the ring.
    ///
    /// Transitions are decided from the state each worker held before the
    /// step, so the promoted worker is not also moved on to OUT_OF_SERVICE.
    pub fn rotate(&mut self, promoted: Option<WorkerId>) {
        for worker in &mut self.workers {
            if Some(worker.id) == promoted {
                debug_assert_eq!(
                    worker.state,
                    WorkerState::Available,
                    "only an available worker can be promoted"
                );
                worker.state = WorkerState::Working;
            } else {
                worker.state = worker.state.rotated();
            }
        }
        tracing::debug!("Worker states after rotation: {:?}", self.states());
    }
}
