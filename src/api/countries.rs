use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::{Country, YouTubeTrendType};

/// `GET /api/countries`
///
/// Loads the country catalogue on first use.
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Country>>>, ApiError> {
    let countries = state.trend_service().list_countries().await?;
    Ok(Json(ApiResponse::success(countries)))
}

/// `GET /api/youtube/trend-types`
pub async fn list_trend_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<YouTubeTrendType>>>, ApiError> {
    let types = state.trend_service().youtube_trend_types().await?;
    Ok(Json(ApiResponse::success(types)))
}
