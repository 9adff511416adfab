use crate::server::AppState;
use crate::services::FinnhubError;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// GET /api/users/{user_id} - Look up a user profile
#[instrument(skip(state))]
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    debug!(%user_id, "Received request for user profile");

    match state.users.get(&user_id) {
        Some(user) => {
            info!(username = %user.username, "Returning user profile");
            (StatusCode::OK, Json(user)).into_response()
        }
        None => {
            warn!(%user_id, "User not found");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "User not found" })),
            )
                .into_response()
        }
    }
}

/// GET /api/users/{user_id}/competitions - List a user's competition history
///
/// A user with no history gets an empty array, not a 404: "never entered
/// a competition" is a normal state, not a missing resource.
#[instrument(skip(state))]
pub async fn get_user_competitions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    debug!(%user_id, "Received request for competition history");

    let records = state.competitions.list_for_user(&user_id);
    info!(%user_id, count = records.len(), "Returning competitions");

    (StatusCode::OK, Json(records)).into_response()
}

/// GET /api/stock/{symbol} - Aggregated quote + company profile
#[instrument(skip(state))]
pub async fn get_stock_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    debug!(%symbol, "Received request for stock data");

    match state.aggregator.get_stock_data(&symbol).await {
        Ok(snapshot) => {
            info!(%symbol, "Returning aggregated stock data");
            (StatusCode::OK, Json(snapshot)).into_response()
        }
        Err(FinnhubError::InvalidSymbol(message)) => {
            warn!(%symbol, %message, "Rejected stock request");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response()
        }
        Err(e) => {
            warn!(%symbol, error = %e, "Upstream stock data request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

impl ChangePasswordRequest {
    fn is_complete(&self) -> bool {
        let present = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.current_password) && present(&self.new_password)
    }
}

/// POST /api/change-password - NON-FUNCTIONAL STUB
///
/// Validates the request shape and claims success without verifying or
/// storing anything. Kept only for frontend compatibility, disabled by
/// default, and loudly logged so it cannot pass for a real implementation.
#[instrument(skip(state, payload))]
pub async fn change_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Response {
    debug_assert!(state.password_stub_enabled);

    if !payload.is_complete() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "message": "Current password and new password are required"
            })),
        )
            .into_response();
    }

    warn!("Password-change stub invoked: reporting success with NO credential change performed");

    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Password updated successfully" })),
    )
        .into_response()
}

/// GET /health - Liveness and config snapshot
#[instrument(skip(state))]
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let uptime_secs = state.started_at.elapsed().as_secs();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "uptimeSecs": uptime_secs,
            "passwordStubEnabled": state.password_stub_enabled,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{build_router, AppState};
    use crate::services::aggregator::MarketDataSource;
    use crate::services::{InMemoryCompetitionStore, InMemoryUserStore, StockAggregator};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Instant;
    use tower::ServiceExt;

    /// Upstream double whose quote call always fails, mirroring a
    /// provider outage or an invalid symbol.
    struct FailingQuoteSource;

    #[async_trait]
    impl MarketDataSource for FailingQuoteSource {
        async fn quote(&self, _symbol: &str) -> Result<Value, FinnhubError> {
            Err(FinnhubError::Api {
                status: 502,
                message: "upstream quote fetch failed".to_string(),
            })
        }

        async fn company_profile(&self, _symbol: &str) -> Result<Value, FinnhubError> {
            Ok(json!({"name": "Apple Inc"}))
        }
    }

    struct HealthySource;

    #[async_trait]
    impl MarketDataSource for HealthySource {
        async fn quote(&self, _symbol: &str) -> Result<Value, FinnhubError> {
            Ok(json!({"c": 211.16, "pc": 208.49}))
        }

        async fn company_profile(&self, _symbol: &str) -> Result<Value, FinnhubError> {
            Ok(json!({"name": "Apple Inc", "ticker": "AAPL"}))
        }
    }

    fn app(source: Arc<dyn MarketDataSource>, password_stub: bool) -> axum::Router {
        build_router(AppState {
            users: Arc::new(InMemoryUserStore::seeded()),
            competitions: Arc::new(InMemoryCompetitionStore::seeded()),
            aggregator: StockAggregator::new(source),
            password_stub_enabled: password_stub,
            started_at: Instant::now(),
        })
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn post_json(app: axum::Router, uri: &str, payload: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_get_known_user() {
        let (status, body) = get(app(Arc::new(HealthySource), false), "/api/users/current-user-id").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "JohnDoe");
        assert_eq!(body["balance"], 10000.75);
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_404() {
        let (status, body) = get(app(Arc::new(HealthySource), false), "/api/users/unknown-id").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User not found");
    }

    #[tokio::test]
    async fn test_competition_history_for_known_user() {
        let (status, body) = get(
            app(Arc::new(HealthySource), false),
            "/api/users/current-user-id/competitions",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "1");
        assert_eq!(records[0]["rank"], 3);
    }

    #[tokio::test]
    async fn test_competition_history_for_unknown_user_is_empty_not_404() {
        let (status, body) = get(
            app(Arc::new(HealthySource), false),
            "/api/users/unknown-id/competitions",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_stock_endpoint_aggregates_quote_and_profile() {
        let (status, body) = get(app(Arc::new(HealthySource), false), "/api/stock/AAPL").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["c"], 211.16);
        assert_eq!(body["profile"]["ticker"], "AAPL");
    }

    #[tokio::test]
    async fn test_stock_endpoint_upstream_failure_returns_500_without_partial_data() {
        let (status, body) = get(app(Arc::new(FailingQuoteSource), false), "/api/stock/AAPL").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
        // All-or-nothing: the successful profile call must not leak through.
        assert!(body.get("quote").is_none());
        assert!(body.get("profile").is_none());
    }

    #[tokio::test]
    async fn test_change_password_stub_missing_fields() {
        let (status, body) = post_json(
            app(Arc::new(HealthySource), true),
            "/api/change-password",
            json!({}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Current password and new password are required"
        );
    }

    #[tokio::test]
    async fn test_change_password_stub_claims_success_without_verification() {
        // Known gap, asserted on purpose: the stub accepts ANY credentials.
        // If this test starts failing, real verification was added and the
        // stub warnings should be removed with it.
        let (status, body) = post_json(
            app(Arc::new(HealthySource), true),
            "/api/change-password",
            json!({"currentPassword": "definitely-wrong", "newPassword": "hunter2"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Password updated successfully");
    }

    #[tokio::test]
    async fn test_change_password_absent_when_stub_disabled() {
        let (status, _body) = post_json(
            app(Arc::new(HealthySource), false),
            "/api/change-password",
            json!({"currentPassword": "a", "newPassword": "b"}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get(app(Arc::new(HealthySource), true), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["passwordStubEnabled"], true);
    }
}
