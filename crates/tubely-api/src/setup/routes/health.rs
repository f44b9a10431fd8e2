//! Liveness and readiness probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub(super) struct ReadinessResponse {
    status: &'static str,
    database: String,
}

pub async fn liveness_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "alive" }))
}

/// 200 once the metadata store answers `SELECT 1`, 503 otherwise.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let probe = sqlx::query("SELECT 1").execute(&state.db.pool);
    let database = match tokio::time::timeout(DB_PROBE_TIMEOUT, probe).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database readiness check failed");
            Err(format!("not_ready: {}", e))
        }
        Err(_) => {
            tracing::error!(timeout_secs = DB_PROBE_TIMEOUT.as_secs(), "Database readiness check timed out");
            Err("timeout".to_string())
        }
    };

    match database {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                database: "ready".to_string(),
            }),
        ),
        Err(database) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "not_ready",
                database,
            }),
        ),
    }
}
