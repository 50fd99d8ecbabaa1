//! Provider adapters: each HTTP client exposed as a [`TrendProvider`].

use std::sync::Arc;

use crate::clients::google_trends::GoogleTrendsClient;
use crate::clients::twitter::TwitterClient;
use crate::clients::youtube::YouTubeClient;
use crate::models::{GoogleTrend, InterestPoint, PeriodType, TwitterTrend, YouTubeVideo};
use crate::services::refresh::TrendProvider;
use crate::services::trend_kinds::{
    GoogleDailyKey, GoogleDailyKind, GoogleWordKey, GoogleWordKind, TwitterKey, TwitterKind,
    YouTubeKey, YouTubeKind,
};

#[async_trait::async_trait]
impl TrendProvider<TwitterKind> for TwitterClient {
    async fn fetch_trends(
        &self,
        key: &TwitterKey,
        _trends_number: &u32,
    ) -> anyhow::Result<Vec<TwitterTrend>> {
        self.place_trends(key.woeid).await
    }
}

#[async_trait::async_trait]
impl TrendProvider<GoogleDailyKind> for GoogleTrendsClient {
    async fn fetch_trends(
        &self,
        key: &GoogleDailyKey,
        _trends_number: &u32,
    ) -> anyhow::Result<Vec<GoogleTrend>> {
        self.country_trends(&key.pn).await
    }
}

#[async_trait::async_trait]
impl TrendProvider<GoogleWordKind> for GoogleTrendsClient {
    async fn fetch_trends(
        &self,
        key: &GoogleWordKey,
        period: &PeriodType,
    ) -> anyhow::Result<Vec<InterestPoint>> {
        self.interest_over_time(&key.word, key.geo.as_deref(), *period)
            .await
    }
}

#[async_trait::async_trait]
impl TrendProvider<YouTubeKind> for YouTubeClient {
    async fn fetch_trends(&self, key: &YouTubeKey, _params: &()) -> anyhow::Result<Vec<YouTubeVideo>> {
        self.most_popular(&key.region_code, key.trend_type.category_filter())
            .await
    }
}

/// The provider set the trend service fetches from.
#[derive(Clone)]
pub struct Providers {
    pub twitter: Arc<dyn TrendProvider<TwitterKind>>,
    pub google: Arc<dyn TrendProvider<GoogleDailyKind>>,
    pub google_word: Arc<dyn TrendProvider<GoogleWordKind>>,
    pub youtube: Arc<dyn TrendProvider<YouTubeKind>>,
}

impl Providers {
    #[must_use]
    pub fn from_clients(
        twitter: Arc<TwitterClient>,
        google: Arc<GoogleTrendsClient>,
        youtube: Arc<YouTubeClient>,
    ) -> Self {
        Self {
            twitter,
            google: google.clone(),
            google_word: google,
            youtube,
        }
    }
}
