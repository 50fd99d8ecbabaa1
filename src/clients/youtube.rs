use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

use crate::config::YouTubeConfig;
use crate::models::YouTubeVideo;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<Video>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Video {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    published_at: DateTime<Utc>,
    channel_title: String,
    #[serde(default)]
    thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// Counts arrive as decimal strings and are omitted when the owner hides them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

const THUMBNAIL_PREFERENCE: [&str; 5] = ["maxres", "standard", "high", "medium", "default"];

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_pages: u32,
    page_size: u32,
}

impl YouTubeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &YouTubeConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_pages: config.max_pages.max(1),
            page_size: config.page_size,
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn chart_url(
        &self,
        api_key: &str,
        region_code: &str,
        category_id: Option<i32>,
        page_token: Option<&str>,
    ) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/videos", self.base_url))
            .map_err(|e| anyhow::anyhow!("Failed to parse YouTube base URL: {e}"))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("part", "snippet,statistics")
                .append_pair("chart", "mostPopular")
                .append_pair("regionCode", region_code)
                .append_pair("maxResults", &self.page_size.to_string())
                .append_pair("key", api_key);

            if let Some(category_id) = category_id {
                query.append_pair("videoCategoryId", &category_id.to_string());
            }
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        Ok(url)
    }

    /// Most popular videos for a region, following page tokens up to the
    /// configured page count.
    pub async fn most_popular(
        &self,
        region_code: &str,
        category_id: Option<i32>,
    ) -> Result<Vec<YouTubeVideo>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("YouTube API key is not configured")?;

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..self.max_pages {
            let url = self.chart_url(api_key, region_code, category_id, page_token.as_deref())?;
            let response = self.client.get(url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                // Keep what earlier pages returned.
                if videos.is_empty() {
                    return Err(anyhow::anyhow!("YouTube API error: {} - {}", status, body));
                }
                tracing::warn!(%status, "YouTube pagination stopped early");
                break;
            }

            let page: VideoListResponse = response.json().await?;
            videos.extend(page.items.into_iter().map(into_video));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(videos)
    }
}

fn into_video(video: Video) -> YouTubeVideo {
    YouTubeVideo {
        thumbnail: best_thumbnail(&video.snippet.thumbnails),
        title: video.snippet.title,
        published_at: video.snippet.published_at,
        channel_title: video.snippet.channel_title,
        view_count: parse_count(video.statistics.view_count.as_deref()),
        like_count: parse_count(video.statistics.like_count.as_deref()),
        comment_count: parse_count(video.statistics.comment_count.as_deref()),
    }
}

fn best_thumbnail(thumbnails: &HashMap<String, Thumbnail>) -> String {
    THUMBNAIL_PREFERENCE
        .iter()
        .find_map(|size| thumbnails.get(*size))
        .map(|t| t.url.clone())
        .unwrap_or_default()
}

fn parse_count(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.parse().ok())
}
