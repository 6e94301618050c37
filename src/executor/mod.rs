//! Task Executor Module
//!
//! Drains a queue of playlist changes through a simulated worker pool.
//!
//! ## Architecture Overview
//! Everything runs on the calling thread; "workers" gate task application but
//! never execute concurrently.
//! 1. **Queue**: `TaskQueue` holds parsed change records in file order.
//! 2. **Pool**: `WorkerPool` tracks each worker's place in the
//!    AVAILABLE -> WORKING -> OUT_OF_SERVICE ring.
//! 3. **Dispatch**: `Dispatcher` selects a worker, rotates the pool and, when a
//!    worker was found, hands the head task to the applier.
//! 4. **Apply**: `apply_task` performs create/update/delete inside the single
//!    shard that owns the playlist id.
//!
//! ## Submodules
//! - **`types`**: tasks, worker states, scan policy and run counters.
//! - **`queue`**: FIFO task queue.
//! - **`pool`**: worker pool and rotation step.
//! - **`applier`**: per-operation mutation of the playlist shards.
//! - **`dispatcher`**: the control loop.

pub mod applier;
pub mod dispatcher;
pub mod pool;
pub mod queue;
pub mod types;
