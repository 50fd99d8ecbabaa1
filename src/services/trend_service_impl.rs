//! `SeaORM` implementation of the `TrendService` trait.

use std::sync::Arc;
use tracing::debug;

use crate::constants::countries::WORLDWIDE_ACRONYM;
use crate::constants::limits::{MAX_TRENDS_NUMBER, MAX_WORD_LENGTH};
use crate::db::Store;
use crate::models::{
    Country, GoogleTrend, InterestPoint, TwitterTrend, YouTubeTrendType, YouTubeVideo,
};
use crate::services::countries::CountryService;
use crate::services::providers::Providers;
use crate::services::refresh::RefreshCoordinator;
use crate::services::trend_kinds::{
    GoogleDailyKey, GoogleDailyKind, GoogleWordKey, GoogleWordKind, TwitterKey, TwitterKind,
    YouTubeKey, YouTubeKind,
};
use crate::services::trend_service::{TrendError, TrendService, WordQuery};

pub struct SeaOrmTrendService {
    store: Store,
    coordinator: Arc<RefreshCoordinator>,
    providers: Providers,
    countries: Arc<CountryService>,
}

impl SeaOrmTrendService {
    #[must_use]
    pub const fn new(
        store: Store,
        coordinator: Arc<RefreshCoordinator>,
        providers: Providers,
        countries: Arc<CountryService>,
    ) -> Self {
        Self {
            store,
            coordinator,
            providers,
            countries,
        }
    }

    async fn resolve_country(&self, name: &str) -> Result<Option<Country>, TrendError> {
        self.countries.ensure_loaded().await?;

        let country = self.store.find_country(name).await?;
        if country.is_none() {
            debug!(country = name, "Unknown country");
        }
        Ok(country)
    }

    fn check_trends_number(trends_number: u32) -> Result<(), TrendError> {
        if trends_number == 0 || trends_number > MAX_TRENDS_NUMBER {
            return Err(TrendError::Validation(format!(
                "trends_number must be between 1 and {MAX_TRENDS_NUMBER}"
            )));
        }
        Ok(())
    }

    /// Region code for the search and video providers. The worldwide entry has
    /// no region; a country without any code cannot be queried.
    fn region_of(country: &Country) -> Option<Option<String>> {
        match country.acronym.as_str() {
            "" => None,
            WORLDWIDE_ACRONYM => Some(None),
            code => Some(Some(code.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl TrendService for SeaOrmTrendService {
    async fn list_countries(&self) -> Result<Vec<Country>, TrendError> {
        self.countries.ensure_loaded().await?;
        Ok(self.store.list_countries().await?)
    }

    async fn twitter_trends(
        &self,
        country: &str,
        trends_number: u32,
    ) -> Result<Vec<TwitterTrend>, TrendError> {
        Self::check_trends_number(trends_number)?;

        let Some(country) = self.resolve_country(country).await? else {
            return Ok(Vec::new());
        };
        let Some(woeid) = country.woeid else {
            debug!(country = %country.name, "No microblog location for country");
            return Ok(Vec::new());
        };

        let key = TwitterKey {
            country_id: country.id,
            woeid,
        };

        self.coordinator
            .ensure_fresh::<TwitterKind, _, _>(
                &self.store.twitter_trends(),
                self.providers.twitter.as_ref(),
                &key,
                &trends_number,
                Some(u64::from(trends_number)),
            )
            .await
    }

    async fn google_trends(
        &self,
        country: &str,
        trends_number: u32,
    ) -> Result<Vec<GoogleTrend>, TrendError> {
        Self::check_trends_number(trends_number)?;

        let Some(country) = self.resolve_country(country).await? else {
            return Ok(Vec::new());
        };
        let Some(pn) = country.pn.clone() else {
            debug!(country = %country.name, "No search trends slug for country");
            return Ok(Vec::new());
        };

        let key = GoogleDailyKey {
            country_id: country.id,
            pn,
        };

        self.coordinator
            .ensure_fresh::<GoogleDailyKind, _, _>(
                &self.store.google_trends(),
                self.providers.google.as_ref(),
                &key,
                &trends_number,
                Some(u64::from(trends_number)),
            )
            .await
    }

    async fn google_word_trends(
        &self,
        country: &str,
        query: WordQuery,
    ) -> Result<Vec<InterestPoint>, TrendError> {
        let word = query.word.trim();
        if word.chars().count() > MAX_WORD_LENGTH {
            return Err(TrendError::Validation(format!(
                "word must be at most {MAX_WORD_LENGTH} characters"
            )));
        }
        if word.is_empty() {
            return Ok(Vec::new());
        }

        let Some(country) = self.resolve_country(country).await? else {
            return Ok(Vec::new());
        };
        let Some(geo) = Self::region_of(&country) else {
            return Ok(Vec::new());
        };

        let key = GoogleWordKey {
            country_id: country.id,
            geo,
            word: word.to_string(),
        };

        self.coordinator
            .ensure_fresh::<GoogleWordKind, _, _>(
                &self.store.google_word_trends(),
                self.providers.google_word.as_ref(),
                &key,
                &query.period,
                query.limit.map(u64::from),
            )
            .await
    }

    async fn youtube_trends(
        &self,
        country: &str,
        trend_type: &str,
        trends_number: u32,
    ) -> Result<Vec<YouTubeVideo>, TrendError> {
        Self::check_trends_number(trends_number)?;

        let Some(country) = self.resolve_country(country).await? else {
            return Ok(Vec::new());
        };
        // The popular chart needs a real region.
        let Some(Some(region_code)) = Self::region_of(&country) else {
            return Ok(Vec::new());
        };
        let Some(trend_type) = self.store.find_trend_type(trend_type).await? else {
            debug!(trend_type, "Unknown video trend type");
            return Ok(Vec::new());
        };

        let key = YouTubeKey {
            country_id: country.id,
            region_code,
            trend_type,
        };

        self.coordinator
            .ensure_fresh::<YouTubeKind, _, _>(
                &self.store.youtube_trends(),
                self.providers.youtube.as_ref(),
                &key,
                &(),
                Some(u64::from(trends_number)),
            )
            .await
    }

    async fn youtube_trend_types(&self) -> Result<Vec<YouTubeTrendType>, TrendError> {
        Ok(self.store.list_trend_types().await?)
    }
}
