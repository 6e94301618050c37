use crate::error::{Result, ShardError};
use crate::ingestion::types::Record;
use serde_json::Value;

/// Stable identity of a simulated worker (its position in the pool).
pub type WorkerId = usize;

/// The kind of mutation a task requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `create_pl`: append the task body as a new playlist.
    CreatePlaylist,
    /// `update_pl`: append `song_ids` to an existing playlist.
    UpdatePlaylist,
    /// `delete_pl`: remove the first playlist with the task's id.
    DeletePlaylist,
    /// Anything else. Applying it is a no-op.
    Unknown(String),
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Operation::CreatePlaylist => "create_pl",
            Operation::UpdatePlaylist => "update_pl",
            Operation::DeletePlaylist => "delete_pl",
            Operation::Unknown(op) => op,
        }
    }
}

impl From<&str> for Operation {
    fn from(op: &str) -> Self {
        match op {
            "create_pl" => Operation::CreatePlaylist,
            "update_pl" => Operation::UpdatePlaylist,
            "delete_pl" => Operation::DeletePlaylist,
            other => Operation::Unknown(other.to_string()),
        }
    }
}

/// A single pending change against one playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub operation: Operation,
    /// Target playlist key, still in its string-encoded form.
    pub id: String,
    /// The change record minus its `operation` field.
    pub body: Record,
}

impl Task {
    /// Splits a raw change record into operation, id and body.
    ///
    /// Only the shape is checked here. Whether `id` is numeric is decided when
    /// the task is applied.
    pub fn from_record(record: Record) -> Result<Self> {
        let operation = match record.get("operation") {
            Some(Value::String(op)) => Operation::from(op.as_str()),
            Some(other) => {
                return Err(ShardError::MalformedTask(format!(
                    "'operation' must be a string, got {other}"
                )))
            }
            None => {
                return Err(ShardError::MalformedTask(
                    "missing 'operation' field".to_string(),
                ))
            }
        };

        let id = match record.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            Some(other) => {
                return Err(ShardError::MalformedTask(format!(
                    "'id' must be a string or integer, got {other}"
                )))
            }
            None => {
                return Err(ShardError::MalformedTask(format!(
                    "{} task has no 'id' field",
                    operation.as_str()
                )))
            }
        };

        let body = record
            .into_iter()
            .filter(|(field, _)| field != "operation")
            .collect();

        Ok(Self { operation, id, body })
    }
}

/// Availability of a simulated worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Available,
    Working,
    OutOfService,
}

impl WorkerState {
    /// Cyclic initial assignment by pool position.
    pub fn initial_for(index: usize) -> Self {
        match index % 3 {
            0 => WorkerState::Available,
            1 => WorkerState::Working,
            _ => WorkerState::OutOfService,
        }
    }

    /// State after one rotation step for a worker that was not promoted.
    ///
    /// Available workers stay available; only selection moves them on.
    pub fn rotated(self) -> Self {
        match self {
            WorkerState::Available => WorkerState::Available,
            WorkerState::Working => WorkerState::OutOfService,
            WorkerState::OutOfService => WorkerState::Available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    pub id: WorkerId,
    pub state: WorkerState,
}

/// How the dispatcher looks for an available worker from its random offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ScanPolicy {
    /// Scan from the offset to the end of the pool and stop. A cycle can find
    /// nobody even though an earlier worker is available.
    #[default]
    ForwardOnly,
    /// Scan from the offset to the end, then from the start up to the offset.
    Wrapping,
}

/// What applying one task did to the playlist store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created,
    Updated { added: usize },
    Deleted,
    /// Update or delete whose target is not in its shard.
    NotFound,
    /// Unrecognised operation.
    Ignored,
}

/// Result of a single dispatch iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A worker was found and the head task applied.
    Applied {
        worker: WorkerId,
        outcome: ApplyOutcome,
    },
    /// No worker was found; the head task stays queued.
    Idle,
    /// The queue was already empty. Nothing rotated.
    Drained,
}

/// Counters for a complete dispatcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Loop iterations, each with exactly one rotation step.
    pub attempts: u64,
    /// Iterations in which no worker was found.
    pub idle_cycles: u64,
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    pub not_found: u64,
    pub ignored: u64,
}

impl DispatchReport {
    pub fn record(&mut self, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Created => self.created += 1,
            ApplyOutcome::Updated { .. } => self.updated += 1,
            ApplyOutcome::Deleted => self.deleted += 1,
            ApplyOutcome::NotFound => self.not_found += 1,
            ApplyOutcome::Ignored => self.ignored += 1,
        }
    }

    /// Number of tasks dequeued and applied.
    pub fn applied(&self) -> u64 {
        self.created + self.updated + self.deleted + self.not_found + self.ignored
    }
}
