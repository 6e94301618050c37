//! Applies a single task to the playlist shards.
//!
//! The target shard is computed from the task id alone and only that bucket is
//! searched: a playlist always lives in the shard derived from its own key.

use super::types::{ApplyOutcome, Operation, Task, WorkerId};
use crate::error::{Result, ShardError};
use crate::storage::memory::{key_matches, ShardedCollection};
use crate::storage::partitioner::parse_int_key;
use serde_json::Value;

const SONG_IDS: &str = "song_ids";

pub fn apply_task(
    worker: WorkerId,
    task: Task,
    playlists: &mut ShardedCollection,
) -> Result<ApplyOutcome> {
    let key = parse_int_key(&task.id)?;
    let shard = playlists.partitioner().shard_for_int(key);
    let key_field = playlists.spec().key_field;

    let Some(bucket) = playlists.bucket_mut(shard) else {
        return Err(ShardError::InvalidConfig(format!(
            "shard {shard} does not exist for playlist {}",
            task.id
        )));
    };

    match task.operation {
        Operation::DeletePlaylist => {
            match bucket.iter().position(|p| key_matches(p, key_field, key)) {
                Some(index) => {
                    bucket.remove(index);
                    tracing::info!("Worker {} removed playlist {}", worker, task.id);
                    Ok(ApplyOutcome::Deleted)
                }
                None => {
                    tracing::warn!("Delete skipped: playlist {} not in shard {}", task.id, shard);
                    Ok(ApplyOutcome::NotFound)
                }
            }
        }
        Operation::CreatePlaylist => {
            // No existence check: a duplicate id is appended alongside the original.
            bucket.push(task.body);
            tracing::info!("Worker {} created playlist {}", worker, task.id);
            Ok(ApplyOutcome::Created)
        }
        Operation::UpdatePlaylist => {
            let Some(playlist) = bucket.iter_mut().find(|p| key_matches(p, key_field, key)) else {
                tracing::warn!("Update skipped: playlist {} not in shard {}", task.id, shard);
                return Ok(ApplyOutcome::NotFound);
            };

            let new_songs = match task.body.get(SONG_IDS) {
                Some(Value::Array(songs)) => songs.clone(),
                _ => {
                    return Err(ShardError::MalformedTask(format!(
                        "update_pl for playlist {} needs a '{SONG_IDS}' array",
                        task.id
                    )))
                }
            };

            let songs = playlist
                .entry(SONG_IDS)
                .or_insert_with(|| Value::Array(Vec::new()));
            let Value::Array(songs) = songs else {
                return Err(ShardError::MalformedRecord(format!(
                    "playlist {} has a non-array '{SONG_IDS}'",
                    task.id
                )));
            };

            let added = new_songs.len();
            songs.extend(new_songs);
            tracing::info!("Worker {} updated playlist {} (+{} songs)", worker, task.id, added);
            Ok(ApplyOutcome::Updated { added })
        }
        Operation::Unknown(op) => {
            tracing::warn!("Ignoring unknown operation '{}' for playlist {}", op, task.id);
            Ok(ApplyOutcome::Ignored)
        }
    }
}
