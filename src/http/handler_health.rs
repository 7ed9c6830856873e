//! Handles GET /health - liveness check

use axum::Json;
use serde_json::{Value, json};

pub async fn handle_health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
