//! Background task execution.
//!
//! [`TaskRunner`] owns the analyzer and the store: [`submit`](TaskRunner::submit)
//! spawns the analysis onto the tokio runtime and returns immediately, and
//! the spawned future publishes the terminal state to the store when it
//! finishes. A failed analysis is recorded as [`TaskState::Failed`] rather
//! than silently dropped, so a poll can report it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::analysis::Analyzer;
use crate::store::{TaskState, TaskStore};

/// Schedules analysis work and publishes results.
///
/// Cheap to clone; clones share the same analyzer and store.
#[derive(Clone)]
pub struct TaskRunner {
    analyzer: Arc<dyn Analyzer>,
    store: Arc<TaskStore>,
}

impl TaskRunner {
    /// Creates a runner publishing to `store` through `analyzer`.
    pub fn new(analyzer: Arc<dyn Analyzer>, store: Arc<TaskStore>) -> Self {
        Self { analyzer, store }
    }

    /// Schedules analysis for `query` under `task_id`.
    ///
    /// Returns as soon as the work is spawned. The handle can be awaited
    /// (tests do) or dropped (the submit endpoint does); dropping it does
    /// not cancel the work. Submissions run independently and concurrently,
    /// with no queue depth limit. Each identifier is written exactly once
    /// by its own execution, so no per-identifier locking is needed.
    pub fn submit(&self, query: String, task_id: String) -> JoinHandle<()> {
        let analyzer = Arc::clone(&self.analyzer);
        let store = Arc::clone(&self.store);

        tokio::spawn(async move {
            info!(task_id = %task_id, query = %query, "running analysis task");

            match analyzer.analyze(&query).await {
                Ok(result) => {
                    store.put(&task_id, TaskState::Completed(result));
                    info!(task_id = %task_id, "analysis task completed");
                },
                Err(e) => {
                    store.put(
                        &task_id,
                        TaskState::Failed {
                            error: e.to_string(),
                        },
                    );
                    error!(task_id = %task_id, error = %e, "analysis task failed");
                },
            }
        })
    }
}
