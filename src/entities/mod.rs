pub mod prelude;

pub mod countries;
pub mod google_country_trends;
pub mod google_trends;
pub mod google_word_trend_points;
pub mod google_word_trends;
pub mod twitter_country_trends;
pub mod twitter_trends;
pub mod youtube_country_trends;
pub mod youtube_trend_types;
pub mod youtube_trends;
