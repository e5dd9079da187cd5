//! Tests for the recorded failure state.
//!
//! The production analyzer is a stub that never fails; these tests wire a
//! failing analyzer through the same router to verify the poll endpoint
//! surfaces failures instead of leaving the task processing forever.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use coze_plugin_server::server::{router, AppState};
use coze_plugin_server::{AnalysisResult, Analyzer, TaskRunner, TaskStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Analyzer that always fails.
struct FailingAnalyzer;

#[async_trait]
impl Analyzer for FailingAnalyzer {
    async fn analyze(&self, _query: &str) -> Result<AnalysisResult> {
        anyhow::bail!("agent pipeline unavailable")
    }
}

async fn start_failing_server() -> SocketAddr {
    let store = Arc::new(TaskStore::new());
    let runner = TaskRunner::new(Arc::new(FailingAnalyzer), Arc::clone(&store));
    let state = Arc::new(AppState { store, runner });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.ok();
    });

    addr
}

#[tokio::test]
async fn failed_execution_is_reported_on_poll() {
    let addr = start_failing_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("http://{addr}/coze-plugin/query"))
        .json(&json!({ "query": "doomed" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let task_id = body["task_id"].as_str().unwrap().to_string();

    let mut done = Value::Null;
    for _ in 0..100 {
        done = client
            .get(format!("http://{addr}/coze-plugin/result/{task_id}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if done["status"] != "processing" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(
        done,
        json!({
            "status": "failed",
            "error": "agent pipeline unavailable"
        })
    );
}
