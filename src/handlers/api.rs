//! API handlers for task submission and result polling

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::analysis::AnalysisResult;
use crate::server::AppState;
use crate::store::TaskState;

/// Submit request body
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Submit response
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub status: &'static str,
    pub task_id: String,
    pub estimated_time: &'static str,
}

/// Poll response
///
/// `status` is one of `processing`, `completed`, `failed`. An unknown
/// identifier is reported as `processing`: the store cannot tell a
/// never-submitted identifier from one whose task is still running.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Accept a query and schedule background analysis for it.
///
/// Returns immediately with a fresh task identifier; the client polls
/// `/coze-plugin/result/{task_id}` for the outcome.
pub async fn submit_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let task_id = Uuid::new_v4().to_string();

    // Fire-and-forget: the handle is dropped, the work keeps running
    let _handle = state.runner.submit(request.query, task_id.clone());

    Json(QueryResponse {
        status: "processing",
        task_id,
        estimated_time: "10s",
    })
}

/// Report the current state of a task.
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
) -> Json<ResultResponse> {
    let response = match state.store.get(&task_id) {
        Some(TaskState::Completed(result)) => ResultResponse {
            status: "completed",
            result: Some(result),
            error: None,
        },
        Some(TaskState::Failed { error }) => ResultResponse {
            status: "failed",
            result: None,
            error: Some(error),
        },
        None => ResultResponse {
            status: "processing",
            result: None,
            error: None,
        },
    };

    Json(response)
}
