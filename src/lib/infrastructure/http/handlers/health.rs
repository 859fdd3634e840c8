//! Liveness handler

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving requests
    #[schema(example = "ok")]
    pub status: String,
}

/// Report that the server is up
#[utoipa::path(
    get,
    operation_id = "health",
    tag = "System",
    path = "/health",
    responses(
        (status = StatusCode::OK, description = "Server is up", body = HealthResponse),
    )
)]
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
