//! End-to-end run over in-memory data.
//!
//! Partitions the dataset, queues the change set, drains the queue into the
//! playlist shards and flattens the result. File handling stays in
//! `ingestion::io`.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::executor::dispatcher::Dispatcher;
use crate::executor::pool::WorkerPool;
use crate::executor::queue::TaskQueue;
use crate::executor::types::DispatchReport;
use crate::ingestion::types::{ChangeSet, Dataset};
use crate::storage::memory::ShardStore;
use crate::storage::partitioner::Partitioner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Final state of a run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub dataset: Dataset,
    pub report: DispatchReport,
}

/// Runs with the RNG described by `config.seed`.
pub fn run(dataset: Dataset, changes: ChangeSet, config: &PipelineConfig) -> Result<PipelineOutput> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_with_rng(dataset, changes, config, rng)
}

pub fn run_with_rng<R: Rng>(
    dataset: Dataset,
    changes: ChangeSet,
    config: &PipelineConfig,
    rng: R,
) -> Result<PipelineOutput> {
    config.validate()?;

    let partitioner = Partitioner::new(config.node_count);
    let mut store = ShardStore::from_dataset(dataset, partitioner)?;
    let mut queue = TaskQueue::load(changes)?;

    let pool = WorkerPool::new(config.worker_count);
    let mut dispatcher = Dispatcher::new(pool, config.scan_policy, rng);
    let report = dispatcher.run(&mut queue, &mut store.playlists)?;

    Ok(PipelineOutput {
        dataset: store.into_output(),
        report,
    })
}
