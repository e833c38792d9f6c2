use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;

use crate::api::middleware::error_handling::ErrorBoundary;

/// GET /health
/// Basic liveness check
pub async fn health_handler(
    State(boundary): State<ErrorBoundary>,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "environment": boundary.config().environment,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
