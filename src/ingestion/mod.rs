//! Ingestion Module
//!
//! The thin file boundary around the core: reads the source dataset and the
//! change set from JSON files, and writes the flattened result back out.
//!
//! ## Workflow
//! 1. **Load**: `load_dataset` / `load_change_set` parse files into typed shapes.
//! 2. **Hand off**: the pipeline partitions the dataset and queues the tasks.
//! 3. **Write**: `write_output` serialises the flattened shard store.

pub mod io;
pub mod types;
