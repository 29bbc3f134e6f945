// [apps/coordinator/src/handlers/health.rs]
//! APARATO: LIVENESS PROBE HANDLER

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub struct HealthHandler;

impl HealthHandler {
    pub async fn handle() -> impl IntoResponse {
        Json(json!({ "status": "ok" }))
    }
}
