//! Liveness endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// `GET /health`: 200 when the store answers and its schema is current,
/// 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if !state.db.health_check().await {
        tracing::error!("Health check failed: database unreachable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": "unreachable" })),
        );
    }

    match state.db.migration_status().await {
        Ok((embedded, applied)) if embedded == applied => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok", "migrations": applied })),
        ),
        Ok((embedded, applied)) => {
            tracing::warn!(embedded, applied, "Schema behind embedded migrations");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "ok", "migrations": applied })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not read migration status");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "ok" })),
            )
        }
    }
}
