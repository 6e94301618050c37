//! Ingestion Data Types
//!
//! Shapes exchanged between the JSON files on disk and the in-memory shard
//! store. Records stay as opaque JSON objects: the core only ever looks at a
//! collection's key field and a playlist's `song_ids`.

use crate::error::{Result, ShardError};
use serde::{Deserialize, Serialize};

/// A single entity or change record: field name -> JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The source dataset, and also the shape of the flattened output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub users: Vec<Record>,
    pub playlists: Vec<Record>,
    pub songs: Vec<Record>,
}

impl Dataset {
    /// Moves the named collection out, leaving an empty one behind.
    pub fn take_collection(&mut self, name: &str) -> Result<Vec<Record>> {
        let collection = match name {
            "users" => &mut self.users,
            "playlists" => &mut self.playlists,
            "songs" => &mut self.songs,
            other => return Err(ShardError::UnknownCollection(other.to_string())),
        };
        Ok(std::mem::take(collection))
    }

    pub fn len(&self) -> usize {
        self.users.len() + self.playlists.len() + self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A batch of pending playlist mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub tasks: Vec<Record>,
}
