//! Asynchronous analysis task service.
//!
//! Exposes a minimal task API: `POST /coze-plugin/query` accepts a query and
//! returns a task identifier immediately; `GET /coze-plugin/result/{task_id}`
//! is polled until the background analysis reaches a terminal state.
//!
//! # Usage
//!
//! ```bash
//! PORT=8000 coze-plugin-server
//! ```
//!
//! # Architecture
//!
//! - [`store::TaskStore`] - concurrent map from task identifier to terminal state
//! - [`runner::TaskRunner`] - spawns analysis work without blocking the caller
//! - [`analysis::Analyzer`] - pluggable analysis seam (stubbed by default)
//! - [`server`] - axum router and serve loop composing the above

pub mod analysis;
pub mod handlers;
pub mod runner;
pub mod server;
pub mod store;

pub use analysis::{AnalysisResult, Analyzer, StubAnalyzer};
pub use runner::TaskRunner;
pub use server::{AppState, Server, ServerConfig};
pub use store::{TaskState, TaskStore};
