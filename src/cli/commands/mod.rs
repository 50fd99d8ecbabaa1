mod countries;
mod trends;

pub use countries::{cmd_list_countries, cmd_list_trend_types};
pub use trends::{cmd_google, cmd_twitter, cmd_word, cmd_youtube};
