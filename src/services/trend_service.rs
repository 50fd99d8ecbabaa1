//! Domain service for country trend queries.
//!
//! Every query resolves the country first. A country that does not exist, or
//! that the provider cannot serve, yields an empty list rather than an error.

use crate::models::{
    Country, GoogleTrend, InterestPoint, PeriodType, TwitterTrend, YouTubeTrendType, YouTubeVideo,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Request for the word interest query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery {
    pub word: String,
    pub period: PeriodType,
    /// `None` returns every stored point.
    pub limit: Option<u32>,
}

#[async_trait::async_trait]
pub trait TrendService: Send + Sync {
    /// Lists known countries, loading the catalogue on first use.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::Storage`] on database failures.
    async fn list_countries(&self) -> Result<Vec<Country>, TrendError>;

    /// Top microblog trends for `country`, at most `trends_number` of them.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::Storage`] on database failures. Provider failures
    /// are not errors.
    async fn twitter_trends(
        &self,
        country: &str,
        trends_number: u32,
    ) -> Result<Vec<TwitterTrend>, TrendError>;

    /// Daily hot searches for `country`.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::Storage`] on database failures.
    async fn google_trends(
        &self,
        country: &str,
        trends_number: u32,
    ) -> Result<Vec<GoogleTrend>, TrendError>;

    /// Interest over time for a word.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::Storage`] on database failures.
    async fn google_word_trends(
        &self,
        country: &str,
        query: WordQuery,
    ) -> Result<Vec<InterestPoint>, TrendError>;

    /// Most popular videos for `country` within a trend type.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::Storage`] on database failures.
    async fn youtube_trends(
        &self,
        country: &str,
        trend_type: &str,
        trends_number: u32,
    ) -> Result<Vec<YouTubeVideo>, TrendError>;

    /// # Errors
    ///
    /// Returns [`TrendError::Storage`] on database failures.
    async fn youtube_trend_types(&self) -> Result<Vec<YouTubeTrendType>, TrendError>;
}
