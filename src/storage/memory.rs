//! In-memory shard buckets.
//!
//! Each collection owns exactly `N` buckets. A record lives in precisely one
//! bucket, chosen from its own key, and is mutated in place through that
//! bucket.

use super::partitioner::{int_key_of, KeyType, Partitioner};
use crate::error::{Result, ShardError};
use crate::ingestion::types::{Dataset, Record};

/// Identifies a collection and how its records are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub key_field: &'static str,
    pub key_type: KeyType,
}

pub const USERS: CollectionSpec = CollectionSpec {
    name: "users",
    key_field: "name",
    key_type: KeyType::String,
};

pub const PLAYLISTS: CollectionSpec = CollectionSpec {
    name: "playlists",
    key_field: "id",
    key_type: KeyType::Integer,
};

pub const SONGS: CollectionSpec = CollectionSpec {
    name: "songs",
    key_field: "id",
    key_type: KeyType::Integer,
};

/// One collection split across `N` insertion-ordered buckets.
#[derive(Debug, Clone)]
pub struct ShardedCollection {
    spec: CollectionSpec,
    partitioner: Partitioner,
    buckets: Vec<Vec<Record>>,
}

impl ShardedCollection {
    pub fn empty(spec: CollectionSpec, partitioner: Partitioner) -> Self {
        Self {
            spec,
            partitioner,
            buckets: vec![Vec::new(); partitioner.num_partitions()],
        }
    }

    /// Distributes `records` over the buckets, preserving read order within
    /// each bucket.
    pub fn init_nodes(
        spec: CollectionSpec,
        records: Vec<Record>,
        partitioner: Partitioner,
    ) -> Result<Self> {
        let mut collection = Self::empty(spec, partitioner);
        for record in records {
            let shard = collection.shard_of(&record)?;
            collection.buckets[shard].push(record);
        }

        tracing::info!(
            "Partitioned '{}' into {} shards: {:?}",
            spec.name,
            collection.buckets.len(),
            collection.bucket_sizes()
        );
        Ok(collection)
    }

    pub fn spec(&self) -> CollectionSpec {
        self.spec
    }

    pub fn partitioner(&self) -> Partitioner {
        self.partitioner
    }

    /// Shard index a record belongs in, computed from its own key.
    pub fn shard_of(&self, record: &Record) -> Result<usize> {
        let key = record
            .get(self.spec.key_field)
            .ok_or_else(|| ShardError::MissingKey {
                collection: self.spec.name.to_string(),
                field: self.spec.key_field.to_string(),
            })?;
        self.partitioner.assign_value(key, self.spec.key_type)
    }

    pub fn buckets(&self) -> &[Vec<Record>] {
        &self.buckets
    }

    pub fn bucket(&self, shard: usize) -> Option<&Vec<Record>> {
        self.buckets.get(shard)
    }

    pub fn bucket_mut(&mut self, shard: usize) -> Option<&mut Vec<Record>> {
        self.buckets.get_mut(shard)
    }

    pub fn bucket_sizes(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in shard-index order, then bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.buckets.iter().flatten()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.buckets.into_iter().flatten().collect()
    }
}

/// Whether `record`'s integer key field equals `id`.
///
/// Records whose key does not parse never match.
pub fn key_matches(record: &Record, key_field: &str, id: i64) -> bool {
    record
        .get(key_field)
        .and_then(|key| int_key_of(key).ok())
        .is_some_and(|key| key == id)
}

/// The three partitioned collections.
#[derive(Debug, Clone)]
pub struct ShardStore {
    pub users: ShardedCollection,
    pub playlists: ShardedCollection,
    pub songs: ShardedCollection,
}

impl ShardStore {
    pub fn from_dataset(mut dataset: Dataset, partitioner: Partitioner) -> Result<Self> {
        let users = ShardedCollection::init_nodes(
            USERS,
            dataset.take_collection(USERS.name)?,
            partitioner,
        )?;
        let playlists = ShardedCollection::init_nodes(
            PLAYLISTS,
            dataset.take_collection(PLAYLISTS.name)?,
            partitioner,
        )?;
        let songs = ShardedCollection::init_nodes(
            SONGS,
            dataset.take_collection(SONGS.name)?,
            partitioner,
        )?;

        Ok(Self {
            users,
            playlists,
            songs,
        })
    }

    /// Flattens every collection back into a single dataset.
    pub fn into_output(self) -> Dataset {
        Dataset {
            users: self.users.into_records(),
            playlists: self.playlists.into_records(),
            songs: self.songs.into_records(),
        }
    }
}
