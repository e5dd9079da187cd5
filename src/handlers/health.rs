//! Liveness handlers

use axum::response::Json;
use serde_json::{json, Value};

/// Static service banner at `/`
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "coze-plugin-server",
        "status": "ok",
    }))
}

/// Health check at `/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
