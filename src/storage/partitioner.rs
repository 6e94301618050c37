use crate::error::{Result, ShardError};
use serde_json::Value;

/// Shard count used when none is configured.
///
/// Every stored shard index depends on this value. Changing it invalidates all
/// previously computed placements and there is no migration path.
pub const NODE_COUNT: usize = 3;

/// How a collection's key is interpreted when choosing a shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Base-10 integer, placed by `value mod N`.
    Integer,
    /// Arbitrary text, placed by the sum of its code points `mod N`.
    String,
}

/// Maps entity keys onto one of a fixed number of shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    num_partitions: usize,
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(NODE_COUNT)
    }
}

impl Partitioner {
    /// `num_partitions` must be non-zero; `PipelineConfig::validate` enforces it
    /// before a run builds one.
    pub fn new(num_partitions: usize) -> Self {
        debug_assert!(num_partitions > 0, "partitioner needs at least one shard");
        Self { num_partitions }
    }

    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    pub fn assign(&self, key: &str, key_type: KeyType) -> Result<usize> {
        match key_type {
            KeyType::Integer => self.assign_int(key),
            KeyType::String => Ok(self.assign_str(key)),
        }
    }

    pub fn assign_int(&self, key: &str) -> Result<usize> {
        Ok(self.shard_for_int(parse_int_key(key)?))
    }

    pub fn assign_str(&self, key: &str) -> usize {
        let sum: u64 = key.chars().map(|c| u64::from(u32::from(c))).sum();
        (sum % self.num_partitions as u64) as usize
    }

    /// Places a key read straight out of a JSON record.
    ///
    /// Integer keys may arrive either as JSON numbers or as numeric strings.
    pub fn assign_value(&self, key: &Value, key_type: KeyType) -> Result<usize> {
        match key_type {
            KeyType::Integer => Ok(self.shard_for_int(int_key_of(key)?)),
            KeyType::String => match key {
                Value::String(s) => Ok(self.assign_str(s)),
                other => Err(ShardError::invalid_string(other.to_string())),
            },
        }
    }

    /// Shard for an already parsed integer key.
    pub fn shard_for_int(&self, value: i64) -> usize {
        // rem_euclid keeps negative keys inside [0, N)
        value.rem_euclid(self.num_partitions as i64) as usize
    }
}

pub fn parse_int_key(key: &str) -> Result<i64> {
    key.parse::<i64>()
        .map_err(|_| ShardError::invalid_integer(key))
}

/// Reads an integer key out of a JSON value.
pub fn int_key_of(key: &Value) -> Result<i64> {
    match key {
        Value::String(s) => parse_int_key(s),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ShardError::invalid_integer(n.to_string())),
        other => Err(ShardError::invalid_integer(other.to_string())),
    }
}
