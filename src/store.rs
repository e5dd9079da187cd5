//! In-memory task store.
//!
//! Thread-safe mapping from task identifier to terminal state, backed by
//! [`DashMap`] for concurrent insert and lookup. Absence of an entry means
//! the task is still processing -- or was never submitted; the store cannot
//! distinguish the two, and the poll endpoint reports both as `processing`.

use dashmap::DashMap;

use crate::analysis::AnalysisResult;

/// Terminal state of a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskState {
    /// Analysis finished and produced a result payload.
    Completed(AnalysisResult),
    /// Background execution failed; the error text is kept for the client.
    Failed {
        /// Rendered error from the analyzer.
        error: String,
    },
}

/// Thread-safe in-memory task store.
///
/// Entries are written exactly once by the task runner when a task reaches
/// a terminal state, and are never deleted or updated afterwards; they live
/// until process exit. No eviction, no size bound, no persistence.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: DashMap<String, TaskState>,
}

impl TaskStore {
    /// Creates an empty task store.
    pub fn new() -> Self {
        Self {
            tasks: DashMap::new(),
        }
    }

    /// Records the terminal state for `task_id`.
    ///
    /// Called at most once per identifier in normal operation, since each
    /// identifier is only ever written by its own execution. A repeated put
    /// for the same identifier is last-write-wins, without error.
    pub fn put(&self, task_id: &str, state: TaskState) {
        self.tasks.insert(task_id.to_string(), state);
    }

    /// Looks up the terminal state for `task_id`.
    ///
    /// Returns `None` while the task is still processing (or if the
    /// identifier was never submitted). Never blocks, never fails.
    pub fn get(&self, task_id: &str) -> Option<TaskState> {
        self.tasks.get(task_id).map(|entry| entry.value().clone())
    }

    /// Returns the number of terminal entries stored.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if no task has reached a terminal state yet.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
