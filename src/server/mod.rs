pub mod api;

use crate::config::AppConfig;
use crate::services::{
    CompetitionStore, FinnhubClient, InMemoryCompetitionStore, InMemoryUserStore, StockAggregator,
    UserStore,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub competitions: Arc<dyn CompetitionStore>,
    pub aggregator: StockAggregator,
    pub password_stub_enabled: bool,
    pub started_at: Instant,
}

/// Build the application router. Split out from [`serve`] so tests can
/// drive the full HTTP surface without binding a socket.
pub fn build_router(state: AppState) -> Router {
    // The API is consumed by browser frontends on arbitrary hosts, so
    // CORS is wide open by contract.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api/users/{user_id}", get(api::get_user_handler))
        .route(
            "/api/users/{user_id}/competitions",
            get(api::get_user_competitions_handler),
        )
        .route("/api/stock/{symbol}", get(api::get_stock_handler))
        .route("/health", get(api::health_handler));

    if state.password_stub_enabled {
        router = router.route("/api/change-password", post(api::change_password_handler));
    }

    router.layer(cors).with_state(state)
}

/// Start the axum server
pub async fn serve(config: AppConfig) -> crate::error::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting tradearena-api server");

    let finnhub = FinnhubClient::new(config.finnhub_api_key.clone())?;

    let state = AppState {
        users: Arc::new(InMemoryUserStore::seeded()),
        competitions: Arc::new(InMemoryCompetitionStore::seeded()),
        aggregator: StockAggregator::new(Arc::new(finnhub)),
        password_stub_enabled: config.enable_password_stub,
        started_at: Instant::now(),
    };

    tracing::info!("Registering routes:");
    tracing::info!("  GET /api/users/{{user_id}}");
    tracing::info!("  GET /api/users/{{user_id}}/competitions");
    tracing::info!("  GET /api/stock/{{symbol}}");
    tracing::info!("  GET /health");
    if config.enable_password_stub {
        tracing::warn!(
            "  POST /api/change-password (STUB: accepts requests but performs no credential change)"
        );
    }

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
