//! System API endpoints: status and health checks.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CacheStatus, ProviderStatus, SystemStatus};

#[derive(Debug, Serialize)]
pub struct HealthLiveResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReadyResponse {
    pub ready: bool,
    pub database: bool,
}

/// `GET /api/system/status`
///
/// Counts countries already in the database; it never triggers a catalogue load.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let database_ok = state.store().ping().await.is_ok();
    let country_count = if database_ok {
        state
            .store()
            .count_countries()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?
    } else {
        0
    };

    let policy = state.shared.coordinator.policy();
    let per_key_locking = state.config().read().await.cache.per_key_locking;

    let status = SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        database_ok,
        country_count,
        providers: ProviderStatus {
            twitter_configured: state.shared.twitter.is_configured(),
            youtube_configured: state.shared.youtube.is_configured(),
        },
        cache: CacheStatus {
            staleness_offset_minutes: policy.offset().num_minutes(),
            effective_threshold_minutes: policy.effective_threshold().num_minutes(),
            per_key_locking,
        },
    };

    Ok(Json(ApiResponse::success(status)))
}

/// `GET /api/system/health/live`
pub async fn health_live() -> impl IntoResponse {
    Json(ApiResponse::success(HealthLiveResponse { status: "alive" }))
}

/// `GET /api/system/health/ready`
///
/// Readiness check against the database connection.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let database = state.store().ping().await.is_ok();

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthReadyResponse {
            ready: database,
            database,
        })),
    )
        .into_response()
}
