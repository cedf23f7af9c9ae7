use crate::{AppState, dto::HealthResponse};
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::warn;

/// GET /health
/// Response: 200 when the store answers, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label) = match state.notes.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!(cause = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            timestamp: Utc::now().timestamp(),
        }),
    )
}
