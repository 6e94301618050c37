//! Sharded Storage Module
//!
//! Holds the users, playlists and songs collections, each split across a fixed
//! number of in-memory shards.
//!
//! ## Core Concepts
//! - **Partitioning**: `Partitioner` maps a key to a shard index. Integer keys use
//!   `value mod N`, string keys use the sum of their code points `mod N`.
//! - **Placement**: a record is placed once, from its own key, and never moves.
//! - **Ownership**: `ShardStore` owns every bucket; mutations go through
//!   `ShardedCollection::bucket_mut` in place.

pub mod memory;
pub mod partitioner;

#[cfg(test)]
mod tests;
