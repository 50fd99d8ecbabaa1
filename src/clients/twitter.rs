use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::TwitterConfig;
use crate::constants::countries::WORLDWIDE_ACRONYM;
use crate::models::TwitterTrend;

#[derive(Debug, Deserialize)]
struct PlaceTrends {
    trends: Vec<RawTrend>,
}

#[derive(Debug, Deserialize)]
struct RawTrend {
    name: String,
    url: String,
    tweet_volume: Option<i64>,
}

/// One entry of `trends/available`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendLocation {
    pub name: String,
    pub woeid: i32,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "countryCode", default)]
    pub country_code: Option<String>,
}

/// Country-level location offered by the trends API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendCountry {
    pub name: String,
    pub acronym: String,
    pub woeid: i32,
}

#[derive(Clone)]
pub struct TwitterClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl TwitterClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &TwitterConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.bearer_token.is_some()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let token = self
            .bearer_token
            .as_deref()
            .context("Twitter bearer token is not configured")?;

        let response = self.client.get(url).bearer_auth(token).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Twitter API error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }

    /// Current trends for a location, in the order the API ranks them.
    pub async fn place_trends(&self, woeid: i32) -> Result<Vec<TwitterTrend>> {
        let mut url = Url::parse(&format!("{}/trends/place.json", self.base_url))
            .map_err(|e| anyhow::anyhow!("Failed to parse Twitter base URL: {e}"))?;
        url.query_pairs_mut().append_pair("id", &woeid.to_string());

        let places: Vec<PlaceTrends> = self.get_json(url).await?;

        Ok(places
            .into_iter()
            .next()
            .map(|place| {
                place
                    .trends
                    .into_iter()
                    .map(|t| TwitterTrend {
                        name: t.name,
                        url: t.url,
                        tweet_volume: t.tweet_volume,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    pub async fn available_locations(&self) -> Result<Vec<TrendLocation>> {
        let url = Url::parse(&format!("{}/trends/available.json", self.base_url))
            .map_err(|e| anyhow::anyhow!("Failed to parse Twitter base URL: {e}"))?;

        self.get_json(url).await
    }

    pub async fn trend_countries(&self) -> Result<Vec<TrendCountry>> {
        let locations = self.available_locations().await?;
        Ok(collapse_locations(locations))
    }
}

/// Keeps the first location seen per country. The location without a country
/// is the worldwide entry.
#[must_use]
pub fn collapse_locations(locations: Vec<TrendLocation>) -> Vec<TrendCountry> {
    let mut countries: Vec<TrendCountry> = Vec::new();

    for location in locations {
        let (name, acronym) = if location.country.is_empty() {
            (location.name, WORLDWIDE_ACRONYM.to_string())
        } else {
            (location.country, location.country_code.unwrap_or_default())
        };

        if countries.iter().any(|c| c.name == name) {
            continue;
        }

        countries.push(TrendCountry {
            name,
            acronym,
            woeid: location.woeid,
        });
    }

    countries
}
