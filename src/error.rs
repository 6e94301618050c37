//! Error types for the shard pipeline.
//!
//! Every error here is fatal for a run: the dispatcher never retries and never
//! resumes from mid-queue state.

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ShardError>;

/// Errors raised while partitioning data or applying tasks.
#[derive(Debug, thiserror::Error)]
pub enum ShardError {
    /// A key could not be interpreted as the expected key type.
    #[error("invalid key {key:?}: expected {expected}")]
    InvalidKey {
        /// The offending key, rendered as text.
        key: String,
        /// What the partitioner expected to find.
        expected: &'static str,
    },

    /// A record did not carry its collection's key field.
    #[error("record in '{collection}' has no '{field}' field")]
    MissingKey {
        /// Collection being partitioned.
        collection: String,
        /// Key field that was looked up.
        field: String,
    },

    /// A stored entity record has an unexpected shape.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A change record has an unexpected shape.
    #[error("malformed task: {0}")]
    MalformedTask(String),

    /// A collection name outside users/playlists/songs was requested.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// The pipeline configuration cannot drive a run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShardError {
    pub(crate) fn invalid_integer(key: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            expected: "a base-10 integer",
        }
    }

    pub(crate) fn invalid_string(key: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            expected: "a string",
        }
    }
}
