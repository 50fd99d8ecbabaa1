//! Trend endpoints. An unknown country, or one the provider does not cover,
//! answers with an empty list.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{validate_limit, validate_period_type, validate_trends_number, validate_word};
use super::{
    ApiError, ApiResponse, AppState, TrendsQuery, WordTrendsQuery, YouTubeTrendsQuery,
};
use crate::models::{GoogleTrend, InterestPoint, TwitterTrend, YouTubeVideo};
use crate::services::WordQuery;

/// `GET /api/countries/{name}/trends/twitter?trends_number=`
pub async fn twitter_trends(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<ApiResponse<Vec<TwitterTrend>>>, ApiError> {
    let trends_number = validate_trends_number(query.trends_number())?;

    let trends = state
        .trend_service()
        .twitter_trends(&country, trends_number)
        .await?;

    Ok(Json(ApiResponse::success(trends)))
}

/// `GET /api/countries/{name}/trends/google?trends_number=`
pub async fn google_trends(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<ApiResponse<Vec<GoogleTrend>>>, ApiError> {
    let trends_number = validate_trends_number(query.trends_number())?;

    let trends = state
        .trend_service()
        .google_trends(&country, trends_number)
        .await?;

    Ok(Json(ApiResponse::success(trends)))
}

/// `GET /api/countries/{name}/trends/google/word?word=&period_type=&limit=`
pub async fn google_word_trends(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
    Query(query): Query<WordTrendsQuery>,
) -> Result<Json<ApiResponse<Vec<InterestPoint>>>, ApiError> {
    let word = validate_word(query.word.as_deref())?.to_string();
    let period = validate_period_type(query.period_type.as_deref())?;
    let limit = validate_limit(query.limit)?;

    let points = state
        .trend_service()
        .google_word_trends(&country, WordQuery { word, period, limit })
        .await?;

    Ok(Json(ApiResponse::success(points)))
}

/// `GET /api/countries/{name}/trends/youtube?trend_type=&trends_number=`
pub async fn youtube_trends(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
    Query(query): Query<YouTubeTrendsQuery>,
) -> Result<Json<ApiResponse<Vec<YouTubeVideo>>>, ApiError> {
    let trends_number = validate_trends_number(query.trends_number())?;

    let videos = state
        .trend_service()
        .youtube_trends(&country, query.trend_type(), trends_number)
        .await?;

    Ok(Json(ApiResponse::success(videos)))
}
