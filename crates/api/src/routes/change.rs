//! Change calculation routes.
//!
//! `POST /api/v1/change` returns a detailed response. `POST /` accepts the
//! same body and returns the bare coin list the calculator frontend renders.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::{AppState, error::error_response};
use coinchange_core::change::{
    CachedOutcome, ChangeError, ChangeOutcome, ChangeSolution, NormalizedInput, parse_decimal,
    parse_denomination_list,
};
use coinchange_shared::AppError;

/// Creates the versioned change routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/change", post(calculate_change))
}

/// Creates the root route used by the calculator frontend.
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", post(calculate_change_plain))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a change calculation.
///
/// Numbers may be sent as JSON numbers or strings. Entries of `coins` that
/// are not numbers are skipped.
#[derive(Debug, Deserialize)]
pub struct ChangeRequest {
    /// Target amount.
    #[serde(default)]
    pub amount: Option<Value>,
    /// Available coin denominations.
    #[serde(default, alias = "denominations")]
    pub coins: CoinList,
}

/// Coin denominations as a JSON array or a comma-separated string.
///
/// Anything else (`null`, a bare number, an object) holds no denominations
/// and is rejected by the normalizer like an empty list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CoinList {
    /// `[0.01, "0.5", 1]`
    List(Vec<Value>),
    /// `"0.01, 0.5, 1"`
    Text(String),
    /// Any other JSON value.
    Other(Value),
}

impl Default for CoinList {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ChangeRequest {
    /// Parsed amount, `None` if missing or not a number.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a JSON number that does not fit
    /// in a decimal.
    pub fn amount(&self) -> Result<Option<Decimal>, AppError> {
        match &self.amount {
            Some(Value::Number(n)) => parse_decimal(&n.to_string()).map(Some).ok_or_else(|| {
                AppError::Validation(format!("amount {n} is outside the supported range"))
            }),
            other => Ok(other.as_ref().and_then(value_to_decimal)),
        }
    }

    /// Parsed denominations, non-numeric entries dropped.
    #[must_use]
    pub fn denominations(&self) -> Vec<Decimal> {
        match &self.coins {
            CoinList::List(values) => values.iter().filter_map(value_to_decimal).collect(),
            CoinList::Text(raw) => parse_denomination_list(raw),
            CoinList::Other(_) => Vec::new(),
        }
    }
}

/// Response for a solved change calculation.
#[derive(Debug, Serialize)]
pub struct ChangeResponse {
    /// Requested amount.
    pub amount: Decimal,
    /// Coins used, largest first.
    pub coins: Vec<Decimal>,
    /// Number of coins used.
    pub coin_count: usize,
    /// Decimal places of the smallest unit used for the calculation.
    pub scale: u32,
    /// Whether this result was returned from cache.
    pub cached: bool,
}

/// A solved request with the input it was computed from.
struct Solved {
    input: NormalizedInput,
    solution: ChangeSolution,
    cached: bool,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reads a decimal from a JSON number or string.
fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Normalizes and solves off the async runtime.
async fn solve_request(state: AppState, request: &ChangeRequest) -> Result<Solved, AppError> {
    let amount = request.amount()?;
    let denominations = request.denominations();

    let (input, result) = tokio::task::spawn_blocking(move || {
        let input = state.service.normalize(amount, &denominations)?;
        let result = match &state.cache {
            Some(cache) => cache.solve_cached(&state.service, input.clone())?,
            None => CachedOutcome {
                outcome: Arc::new(state.service.solve(&input)?),
                cached: false,
            },
        };
        Ok::<_, ChangeError>((input, result))
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Change computation task failed");
        AppError::Internal("change computation did not complete".into())
    })??;

    match result.outcome.as_ref() {
        ChangeOutcome::Solved(solution) => Ok(Solved {
            solution: solution.clone(),
            input,
            cached: result.cached,
        }),
        ChangeOutcome::Unreachable { amount } => Err(AppError::NoExactChange(format!(
            "no combination of the given coins makes exactly {amount}"
        ))),
    }
}

fn log_solved(solved: &Solved) {
    info!(
        amount = %solved.input.amount,
        scale = solved.input.scale,
        denominations = solved.input.denominations.len(),
        coin_count = solved.solution.coin_count(),
        cached = solved.cached,
        "Change calculated"
    );
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/v1/change
async fn calculate_change(
    State(state): State<AppState>,
    Json(request): Json<ChangeRequest>,
) -> Response {
    match solve_request(state, &request).await {
        Ok(solved) => {
            log_solved(&solved);
            let response = ChangeResponse {
                amount: solved.input.amount,
                coin_count: solved.solution.coin_count(),
                coins: solved.solution.coins,
                scale: solved.input.scale,
                cached: solved.cached,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// POST /
async fn calculate_change_plain(
    State(state): State<AppState>,
    Json(request): Json<ChangeRequest>,
) -> Response {
    match solve_request(state, &request).await {
        Ok(solved) => {
            log_solved(&solved);
            (StatusCode::OK, Json(solved.solution.coins)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{
            Request,
            header::{CONTENT_LENGTH, CONTENT_TYPE},
        },
    };
    use coinchange_shared::{AppConfig, ServerConfig};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::create_router;

    fn test_app(config: &AppConfig) -> Router {
        create_router(AppState::from_config(config), &ServerConfig::default())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(json!(7.03), Some(dec!(7.03)))]
    #[case(json!(10), Some(dec!(10)))]
    #[case(json!(" 0.5 "), Some(dec!(0.5)))]
    #[case(json!("abc"), None)]
    #[case(json!(null), None)]
    #[case(json!(true), None)]
    #[case(json!([1]), None)]
    fn test_value_to_decimal(#[case] value: Value, #[case] expected: Option<Decimal>) {
        assert_eq!(value_to_decimal(&value), expected);
    }

    #[test]
    fn test_request_parsing() {
        let request: ChangeRequest =
            serde_json::from_value(json!({ "amount": "7.03", "coins": [0.01, "x", "0.5", null] }))
                .unwrap();
        assert_eq!(request.amount().unwrap(), Some(dec!(7.03)));
        assert_eq!(request.denominations(), vec![dec!(0.01), dec!(0.5)]);

        let request: ChangeRequest =
            serde_json::from_value(json!({ "amount": 6, "denominations": "1, 3,4" })).unwrap();
        assert_eq!(request.denominations(), vec![dec!(1), dec!(3), dec!(4)]);

        let request: ChangeRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.amount().unwrap(), None);
        assert!(request.denominations().is_empty());
    }

    #[rstest]
    #[case(json!({ "amount": 5, "coins": null }))]
    #[case(json!({ "amount": 5, "coins": 5 }))]
    #[case(json!({ "amount": 5, "coins": { "a": 1 } }))]
    fn test_non_list_coins_parse_as_empty(#[case] body: Value) {
        let request: ChangeRequest = serde_json::from_value(body).unwrap();
        assert!(request.denominations().is_empty());
    }

    #[test]
    fn test_out_of_range_amount() {
        let request: ChangeRequest =
            serde_json::from_value(json!({ "amount": 1e30, "coins": [1] })).unwrap();
        let err = request.amount().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("outside the supported range"));
    }

    #[tokio::test]
    async fn test_change_with_cents() {
        let app = test_app(&AppConfig::default());
        let (status, body) = post_json(
            app,
            "/api/v1/change",
            json!({ "amount": 7.03, "coins": [0.01, 0.5, 1, 5, 10] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], "7.03");
        assert_eq!(body["coins"], json!(["5", "1", "1", "0.01", "0.01", "0.01"]));
        assert_eq!(body["coin_count"], 6);
        assert_eq!(body["scale"], 2);
        assert_eq!(body["cached"], false);
    }

    #[tokio::test]
    async fn test_root_returns_bare_coin_list() {
        let app = test_app(&AppConfig::default());
        let (status, body) = post_json(app, "/", json!({ "amount": 6, "coins": [1, 3, 4] })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["3", "3"]));
    }

    #[tokio::test]
    async fn test_zero_amount_is_empty_list() {
        let app = test_app(&AppConfig::default());
        let (status, body) = post_json(
            app,
            "/api/v1/change",
            json!({ "amount": 0, "coins": [1, 5] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["coins"], json!([]));
        assert_eq!(body["coin_count"], 0);
    }

    #[tokio::test]
    async fn test_unreachable_amount() {
        let app = test_app(&AppConfig::default());
        let (status, body) = post_json(app, "/", json!({ "amount": 3, "coins": [2, 5] })).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "NO_EXACT_CHANGE");
    }

    #[rstest]
    #[case(json!({ "amount": -1, "coins": [1] }))]
    #[case(json!({ "amount": 5, "coins": [] }))]
    #[case(json!({ "amount": 5, "coins": ["a", 0, -2] }))]
    #[case(json!({ "coins": [1] }))]
    #[case(json!({ "amount": "five", "coins": [1] }))]
    #[case(json!({ "amount": 5, "coins": null }))]
    #[case(json!({ "amount": 5, "coins": 5 }))]
    #[case(json!({ "amount": 1e30, "coins": [1] }))]
    #[tokio::test]
    async fn test_invalid_input(#[case] body: Value) {
        let app = test_app(&AppConfig::default());
        let (status, body) = post_json(app, "/api/v1/change", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_amount_beyond_table_limit() {
        let app = test_app(&AppConfig::default());
        let (status, body) = post_json(
            app,
            "/api/v1/change",
            json!({ "amount": 1_000_000, "coins": [1] }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "RESOURCE_LIMIT_EXCEEDED");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let server = ServerConfig {
            max_body_bytes: 64,
            ..ServerConfig::default()
        };
        let app = create_router(AppState::from_config(&AppConfig::default()), &server);
        let coins = vec![1; 64];
        let body = json!({ "amount": 1, "coins": coins }).to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/change")
                    .header(CONTENT_TYPE, "application/json")
                    .header(CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_repeat_request_is_cached() {
        let app = test_app(&AppConfig::default());
        let request = json!({ "amount": "2.5", "coins": "0.5, 1" });

        let (_, first) = post_json(app.clone(), "/api/v1/change", request.clone()).await;
        let (_, second) = post_json(app, "/api/v1/change", request).await;

        assert_eq!(first["cached"], false);
        assert_eq!(second["cached"], true);
        assert_eq!(first["coins"], second["coins"]);
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let mut config = AppConfig::default();
        config.cache.enabled = false;
        let app = test_app(&config);
        let request = json!({ "amount": 2, "coins": [1] });

        post_json(app.clone(), "/api/v1/change", request.clone()).await;
        let (_, second) = post_json(app, "/api/v1/change", request).await;
        assert_eq!(second["cached"], false);
    }

    #[tokio::test]
    async fn test_fixed_scale_rejects_sub_cent_amount() {
        let mut config = AppConfig::default();
        config.solver.scale = Some(2);
        let app = test_app(&config);

        let (status, body) = post_json(
            app,
            "/api/v1/change",
            json!({ "amount": "1.005", "coins": [0.01] }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_response_carries_request_id() {
        let app = test_app(&AppConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"amount":1,"coins":[1]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(&AppConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["max_target_units"], 999_999);
        assert_eq!(body["cache_entries"], 0);
    }
}
