//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - The root endpoint called by the calculator frontend
//! - JSON error responses

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use coinchange_core::change::{ChangeCache, ChangeService};
use coinchange_shared::{AppConfig, ServerConfig};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Normalizer and solver.
    pub service: Arc<ChangeService>,
    /// Result cache (optional).
    pub cache: Option<ChangeCache>,
}

impl AppState {
    /// Builds state from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let cache = config
            .cache
            .enabled
            .then(|| ChangeCache::with_config(config.cache.capacity, config.cache.ttl_secs));

        Self {
            service: Arc::new(ChangeService::from(&config.solver)),
            cache,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::root_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
