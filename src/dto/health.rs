//! Health payload returned by the `/healthcheck` route.

use serde::Serialize;
use utoipa::ToSchema;

/// Health status of the backend and its database.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// The backend and its database are reachable.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// The database did not answer the health ping.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
