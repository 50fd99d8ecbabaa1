use axum::{Router, http::HeaderValue, http::Uri, middleware, routing::get};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{Providers, TrendService};
use crate::state::SharedState;

mod countries;
mod error;
mod observability;
mod system;
mod trends;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn trend_service(&self) -> &Arc<dyn TrendService> {
        &self.shared.trend_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Same as [`create_app_state_from_config`] with trends fetched through `providers`.
pub async fn create_app_state_with_providers(
    config: Config,
    providers: Providers,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_providers(config, Some(providers)).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state
        .config()
        .read()
        .await
        .server
        .cors_allowed_origins
        .clone();

    let api_router = Router::new()
        .route("/countries", get(countries::list_countries))
        .route(
            "/countries/{name}/trends/twitter",
            get(trends::twitter_trends),
        )
        .route(
            "/countries/{name}/trends/google",
            get(trends::google_trends),
        )
        .route(
            "/countries/{name}/trends/google/word",
            get(trends::google_word_trends),
        )
        .route(
            "/countries/{name}/trends/youtube",
            get(trends::youtube_trends),
        )
        .route("/youtube/trend-types", get(countries::list_trend_types))
        .route("/system/status", get(system::get_status))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
        .fallback(route_not_found)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Route", uri.path())
}
