//! Sharded Playlist Store
//!
//! Partitions a mixtape dataset (users, playlists, songs) across a fixed number
//! of in-memory shards and applies a queue of playlist changes through a
//! simulated worker pool.
//!
//! ## Architecture Modules
//! - **`storage`**: key-to-shard mapping and the sharded collections.
//! - **`executor`**: task queue, worker ring, dispatcher loop and task applier.
//! - **`ingestion`**: JSON shapes and the file loader/writer around the core.
//! - **`pipeline`**: wires the above into a single run.
//! - **`config`** / **`error`**: run settings and the library error type.

pub mod config;
pub mod error;
pub mod executor;
pub mod ingestion;
pub mod pipeline;
pub mod storage;

pub use config::PipelineConfig;
pub use error::{Result, ShardError};
pub use pipeline::{run, PipelineOutput};
