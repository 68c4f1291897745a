//! Health check handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use carhub_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let cache_ok = match state.cache.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            false
        }
    };

    Json(ApiResponse::ok(HealthResponse {
        status: if cache_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: if cache_ok { "connected" } else { "unavailable" }.to_string(),
    }))
}
