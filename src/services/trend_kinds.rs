//! The cached trend kinds and the keys they are stored under.

use crate::models::{GoogleTrend, InterestPoint, PeriodType, TwitterTrend, YouTubeTrendType, YouTubeVideo};
use crate::services::refresh::TrendKind;

/// Trending topics for a country, fetched by WOEID.
pub struct TwitterKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterKey {
    pub country_id: i32,
    pub woeid: i32,
}

impl TrendKind for TwitterKind {
    const NAME: &'static str = "twitter";
    type Key = TwitterKey;
    /// Requested number of trends.
    type Params = u32;
    type Item = TwitterTrend;

    fn lock_key(key: &TwitterKey) -> String {
        format!("twitter:{}", key.country_id)
    }
}

/// Daily hot searches for a country, fetched by the provider's `pn` code.
pub struct GoogleDailyKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleDailyKey {
    pub country_id: i32,
    pub pn: String,
}

impl TrendKind for GoogleDailyKind {
    const NAME: &'static str = "google";
    type Key = GoogleDailyKey;
    type Params = u32;
    type Item = GoogleTrend;

    fn lock_key(key: &GoogleDailyKey) -> String {
        format!("google:{}", key.country_id)
    }
}

/// Interest over time for one word in one country.
pub struct GoogleWordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleWordKey {
    pub country_id: i32,
    /// Two-letter geo code; `None` asks for worldwide interest.
    pub geo: Option<String>,
    pub word: String,
}

impl TrendKind for GoogleWordKind {
    const NAME: &'static str = "google_word";
    type Key = GoogleWordKey;
    type Params = PeriodType;
    type Item = InterestPoint;

    fn lock_key(key: &GoogleWordKey) -> String {
        format!("google_word:{}:{}", key.country_id, key.word)
    }
}

/// Most popular videos for a region, optionally narrowed to a category.
pub struct YouTubeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeKey {
    pub country_id: i32,
    pub region_code: String,
    pub trend_type: YouTubeTrendType,
}

impl TrendKind for YouTubeKind {
    const NAME: &'static str = "youtube";
    type Key = YouTubeKey;
    type Params = ();
    type Item = YouTubeVideo;

    fn lock_key(key: &YouTubeKey) -> String {
        format!("youtube:{}:{}", key.country_id, key.trend_type.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_keys_separate_kinds_and_countries() {
        let twitter = TwitterKind::lock_key(&TwitterKey {
            country_id: 1,
            woeid: 23_424_950,
        });
        let google = GoogleDailyKind::lock_key(&GoogleDailyKey {
            country_id: 1,
            pn: "spain".to_string(),
        });
        let other = TwitterKind::lock_key(&TwitterKey {
            country_id: 2,
            woeid: 23_424_950,
        });

        assert_ne!(twitter, google);
        assert_ne!(twitter, other);
    }

    #[test]
    fn word_lock_key_includes_word() {
        let key = |word: &str| GoogleWordKey {
            country_id: 7,
            geo: Some("ES".to_string()),
            word: word.to_string(),
        };
        assert_ne!(
            GoogleWordKind::lock_key(&key("rust")),
            GoogleWordKind::lock_key(&key("go"))
        );
    }
}
