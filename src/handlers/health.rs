use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::center::FitnessCenter;
use crate::version::GIT_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

/// Liveness plus a round trip to the database.
pub async fn health_check(
    State(center): State<FitnessCenter>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, database) = match center.member_count().await {
        Ok(_) => ("ok", StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };
    (
        code,
        Json(HealthResponse {
            status,
            database,
            version: GIT_VERSION,
        }),
    )
}
