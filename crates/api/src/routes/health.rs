//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;
use coinchange_core::change::ChangeCache;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Largest target the solver accepts, in smallest units.
    pub max_target_units: usize,
    /// Cached entries, absent when caching is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_entries: Option<u64>,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        max_target_units: state.service.limits().max_table_entries.saturating_sub(1),
        cache_entries: state.cache.as_ref().map(ChangeCache::entry_count),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
