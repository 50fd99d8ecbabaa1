pub use super::countries::Entity as Countries;
pub use super::google_country_trends::Entity as GoogleCountryTrends;
pub use super::google_trends::Entity as GoogleTrends;
pub use super::google_word_trend_points::Entity as GoogleWordTrendPoints;
pub use super::google_word_trends::Entity as GoogleWordTrends;
pub use super::twitter_country_trends::Entity as TwitterCountryTrends;
pub use super::twitter_trends::Entity as TwitterTrends;
pub use super::youtube_country_trends::Entity as YoutubeCountryTrends;
pub use super::youtube_trend_types::Entity as YoutubeTrendTypes;
pub use super::youtube_trends::Entity as YoutubeTrends;
