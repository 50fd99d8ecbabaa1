use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterTrend {
    pub name: String,
    pub url: String,
    pub tweet_volume: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleTrend {
    pub name: String,
}

/// One sample of search interest for a word, scaled 0..=100 by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestPoint {
    pub timestamp: DateTime<Utc>,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeVideo {
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail: String,
    pub channel_title: String,
    pub view_count: Option<i64>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeTrendType {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
}

impl YouTubeTrendType {
    /// The unfiltered chart is requested without a category.
    #[must_use]
    pub const fn category_filter(&self) -> Option<i32> {
        if self.category_id == 0 {
            None
        } else {
            Some(self.category_id)
        }
    }
}

/// Time window for word interest queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    #[default]
    Year,
    FiveYears,
}

impl PeriodType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::FiveYears => "five_years",
        }
    }

    /// Timeframe expression understood by the search trends explore endpoint.
    #[must_use]
    pub const fn timeframe(self) -> &'static str {
        match self {
            Self::Hour => "now 1-H",
            Self::Day => "now 1-d",
            Self::Week => "now 7-d",
            Self::Month => "today 1-m",
            Self::Quarter => "today 3-m",
            Self::Year => "today 12-m",
            Self::FiveYears => "today 5-y",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "now 1-h" => Ok(Self::Hour),
            "day" | "now 1-d" => Ok(Self::Day),
            "week" | "now 7-d" => Ok(Self::Week),
            "month" | "today 1-m" => Ok(Self::Month),
            "quarter" | "today 3-m" => Ok(Self::Quarter),
            "year" | "today 12-m" => Ok(Self::Year),
            "five_years" | "today 5-y" => Ok(Self::FiveYears),
            other => Err(format!("Unknown period type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_type_parses_names_and_timeframes() {
        assert_eq!("week".parse::<PeriodType>(), Ok(PeriodType::Week));
        assert_eq!("today 5-y".parse::<PeriodType>(), Ok(PeriodType::FiveYears));
        assert_eq!(" Year ".parse::<PeriodType>(), Ok(PeriodType::Year));
        assert!("decade".parse::<PeriodType>().is_err());
    }

    #[test]
    fn period_type_round_trips_through_storage_name() {
        for period in [PeriodType::Hour, PeriodType::Quarter, PeriodType::FiveYears] {
            assert_eq!(period.as_str().parse::<PeriodType>(), Ok(period));
        }
    }

    #[test]
    fn default_trend_type_has_no_category_filter() {
        let default = YouTubeTrendType {
            id: 1,
            name: "Default".to_string(),
            category_id: 0,
        };
        let music = YouTubeTrendType {
            id: 3,
            name: "Music".to_string(),
            category_id: 10,
        };
        assert_eq!(default.category_filter(), None);
        assert_eq!(music.category_filter(), Some(10));
    }
}
