//! Health check: ping the database and report ok or degraded.

use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the store and translate the outcome into a health payload.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().ping().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "database health check failed");
            HealthResponse::degraded()
        }
    }
}
