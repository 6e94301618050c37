//! FIFO task queue.
//!
//! Loaded once from a change set and drained strictly from the front. Tasks
//! are never reordered, deduplicated or prioritised.

use super::types::Task;
use crate::error::Result;
use crate::ingestion::types::ChangeSet;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues every record under `tasks`, in file order.
    pub fn load(change_set: ChangeSet) -> Result<Self> {
        let mut queue = Self::new();
        for record in change_set.tasks {
            queue.push(Task::from_record(record)?);
        }
        tracing::info!("Loaded {} tasks into the queue", queue.len());
        Ok(queue)
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<Task> {
        self.tasks.pop_front()
    }

    pub fn peek(&self) -> Option<&Task> {
        self.tasks.front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl FromIterator<Task> for TaskQueue {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}
