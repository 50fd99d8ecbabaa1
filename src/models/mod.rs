pub mod country;
pub mod trend;

pub use country::{Country, NewCountry};
pub use trend::{GoogleTrend, InterestPoint, PeriodType, TwitterTrend, YouTubeTrendType, YouTubeVideo};
