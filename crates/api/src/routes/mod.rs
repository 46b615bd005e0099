//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod change;
pub mod health;

/// Creates the versioned API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(change::routes())
}

/// Creates the routes served at the root path.
pub fn root_routes() -> Router<AppState> {
    change::root_routes()
}
