//! Run configuration.
//!
//! Shard count, pool size and worker selection policy are injected here rather
//! than baked into the partitioner or dispatcher, so every component can be
//! exercised against other sizes.

use crate::error::{Result, ShardError};
use crate::executor::types::ScanPolicy;
use crate::storage::partitioner::NODE_COUNT;

/// Number of simulated workers when none is configured.
pub const DEFAULT_WORKER_COUNT: usize = 5;

/// Settings for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of shards per collection.
    pub node_count: usize,
    /// Number of workers in the pool.
    pub worker_count: usize,
    /// How the dispatcher scans for an available worker.
    pub scan_policy: ScanPolicy,
    /// Seed for worker selection. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            node_count: NODE_COUNT,
            worker_count: DEFAULT_WORKER_COUNT,
            scan_policy: ScanPolicy::default(),
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_scan_policy(mut self, scan_policy: ScanPolicy) -> Self {
        self.scan_policy = scan_policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects sizes that can never complete a run.
    pub fn validate(&self) -> Result<()> {
        if self.node_count == 0 {
            return Err(ShardError::InvalidConfig(
                "node_count must be at least 1".to_string(),
            ));
        }
        if self.worker_count == 0 {
            return Err(ShardError::InvalidConfig(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
