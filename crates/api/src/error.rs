//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, info};

use coinchange_shared::AppError;

/// Renders an `AppError` as `{ "error": CODE, "message": text }`.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_server_error() {
        error!(error = %err, "Request failed");
    } else {
        info!(code = err.error_code(), error = %err, "Request rejected");
    }

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
