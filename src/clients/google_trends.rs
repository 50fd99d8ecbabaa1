use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use url::Url;

use crate::config::GoogleConfig;
use crate::models::{GoogleTrend, InterestPoint, PeriodType};

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    token: String,
    request: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: Timeline,
}

#[derive(Debug, Deserialize)]
struct Timeline {
    #[serde(rename = "timelineData", default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    time: String,
    value: Vec<i32>,
}

#[derive(Clone)]
pub struct GoogleTrendsClient {
    client: Client,
    base_url: String,
    language: String,
    timezone_offset: i32,
}

impl GoogleTrendsClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &GoogleConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            timezone_offset: config.timezone_offset,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| anyhow::anyhow!("Failed to parse Google Trends base URL: {e}"))?;
        url.query_pairs_mut()
            .append_pair("hl", &self.language)
            .append_pair("tz", &self.timezone_offset.to_string());
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Google Trends error: {} - {}", status, body));
        }

        Ok(response.text().await?)
    }

    /// Hot searches for every supported country, keyed by snake_case slug.
    pub async fn hot_trends(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let url = self.endpoint("hottrends/visualize/internal/data")?;
        let body = self.get_text(url).await?;
        Ok(serde_json::from_str(strip_json_guard(&body))?)
    }

    pub async fn country_trends(&self, pn: &str) -> Result<Vec<GoogleTrend>> {
        let mut all = self.hot_trends().await?;

        Ok(all
            .remove(pn)
            .unwrap_or_default()
            .into_iter()
            .map(|name| GoogleTrend { name })
            .collect())
    }

    /// Interest over time for `word`. `geo` of `None` means worldwide.
    pub async fn interest_over_time(
        &self,
        word: &str,
        geo: Option<&str>,
        period: PeriodType,
    ) -> Result<Vec<InterestPoint>> {
        let request = json!({
            "comparisonItem": [{
                "keyword": word,
                "geo": geo.unwrap_or(""),
                "time": period.timeframe(),
            }],
            "category": 0,
            "property": "",
        });

        let mut url = self.endpoint("api/explore")?;
        url.query_pairs_mut()
            .append_pair("req", &request.to_string());

        let body = self.get_text(url).await?;
        let explore: ExploreResponse = serde_json::from_str(strip_json_guard(&body))?;

        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id == "TIMESERIES")
            .context("Explore response has no time series widget")?;

        let mut url = self.endpoint("api/widgetdata/multiline")?;
        url.query_pairs_mut()
            .append_pair("req", &widget.request.to_string())
            .append_pair("token", &widget.token);

        let body = self.get_text(url).await?;
        let multiline: MultilineResponse = serde_json::from_str(strip_json_guard(&body))?;

        Ok(parse_timeline(multiline.default.timeline_data))
    }
}

/// Drops the anti-JSON-hijacking prefix (`)]}'`) some endpoints prepend.
fn strip_json_guard(body: &str) -> &str {
    body.find(['{', '['])
        .map_or(body, |start| &body[start..])
}

fn parse_timeline(points: Vec<TimelinePoint>) -> Vec<InterestPoint> {
    points
        .into_iter()
        .filter_map(|p| {
            let secs = p.time.parse::<i64>().ok()?;
            let timestamp: DateTime<Utc> = DateTime::from_timestamp(secs, 0)?;
            Some(InterestPoint {
                timestamp,
                value: p.value.first().copied().unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_guard() {
        assert_eq!(strip_json_guard(")]}'\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_json_guard(")]}',\n{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_json_guard("[1,2]"), "[1,2]");
    }

    #[test]
    fn test_parse_timeline_skips_bad_timestamps() {
        let raw = r#"{"default":{"timelineData":[
            {"time":"1609459200","formattedTime":"Jan 1, 2021","value":[57]},
            {"time":"not-a-number","value":[12]},
            {"time":"1610064000","value":[100]}
        ]}}"#;

        let parsed: MultilineResponse = serde_json::from_str(raw).unwrap();
        let points = parse_timeline(parsed.default.timeline_data);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 57);
        assert_eq!(points[0].timestamp.timestamp(), 1_609_459_200);
        assert_eq!(points[1].value, 100);
    }

    #[test]
    fn test_hot_trends_payload() {
        let raw = r#"{"spain":["Rust","Madrid"],"united_states":["Weather"]}"#;
        let parsed: BTreeMap<String, Vec<String>> =
            serde_json::from_str(strip_json_guard(raw)).unwrap();
        assert_eq!(parsed["spain"], vec!["Rust", "Madrid"]);
    }
}
