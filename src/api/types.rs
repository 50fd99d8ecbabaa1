use serde::{Deserialize, Serialize};

use crate::constants::limits::DEFAULT_TRENDS_NUMBER;
use crate::constants::youtube::DEFAULT_TREND_TYPE;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    pub trends_number: Option<u32>,
}

impl TrendsQuery {
    #[must_use]
    pub fn trends_number(&self) -> u32 {
        self.trends_number.unwrap_or(DEFAULT_TRENDS_NUMBER)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct YouTubeTrendsQuery {
    pub trend_type: Option<String>,
    pub trends_number: Option<u32>,
}

impl YouTubeTrendsQuery {
    #[must_use]
    pub fn trend_type(&self) -> &str {
        self.trend_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TREND_TYPE)
    }

    #[must_use]
    pub fn trends_number(&self) -> u32 {
        self.trends_number.unwrap_or(DEFAULT_TRENDS_NUMBER)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WordTrendsQuery {
    pub word: Option<String>,
    pub period_type: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub twitter_configured: bool,
    pub youtube_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct CacheStatus {
    pub staleness_offset_minutes: i64,
    pub effective_threshold_minutes: i64,
    pub per_key_locking: bool,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub database_ok: bool,
    pub country_count: u64,
    pub providers: ProviderStatus,
    pub cache: CacheStatus,
}
