//! CLI module - Command-line interface for TopTrends
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};

use crate::constants::limits::DEFAULT_TRENDS_NUMBER;
use crate::constants::youtube::DEFAULT_TREND_TYPE;

/// TopTrends - per-country trending topics, searches and videos
#[derive(Parser)]
#[command(name = "toptrends")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API until Ctrl+C
    #[command(alias = "daemon")]
    Serve,

    /// List known countries
    #[command(alias = "ls")]
    Countries,

    /// Show microblog trends for a country
    #[command(alias = "tw")]
    Twitter {
        /// Country name, e.g. "Spain"
        country: String,
        /// Number of trends to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRENDS_NUMBER)]
        trends_number: u32,
    },

    /// Show daily search trends for a country
    #[command(alias = "g")]
    Google {
        country: String,
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRENDS_NUMBER)]
        trends_number: u32,
    },

    /// Show search interest over time for a word
    Word {
        country: String,
        word: String,
        /// hour, day, week, month, quarter, year or five_years
        #[arg(short, long, default_value = "year")]
        period: String,
        /// Only show the first N points
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show popular videos for a country
    #[command(alias = "yt")]
    Youtube {
        country: String,
        /// Trend type name, see `toptrends trend-types`
        #[arg(short, long, default_value = DEFAULT_TREND_TYPE)]
        trend_type: String,
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRENDS_NUMBER)]
        trends_number: u32,
    },

    /// List video trend types
    TrendTypes,

    /// Write a default config.toml
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_twitter_command() {
        let cli = Cli::try_parse_from(["toptrends", "twitter", "Spain", "-n", "10"]).unwrap();
        match cli.command {
            Some(Commands::Twitter {
                country,
                trends_number,
            }) => {
                assert_eq!(country, "Spain");
                assert_eq!(trends_number, 10);
            }
            _ => panic!("expected twitter command"),
        }
    }

    #[test]
    fn test_youtube_defaults() {
        let cli = Cli::try_parse_from(["toptrends", "youtube", "Japan"]).unwrap();
        match cli.command {
            Some(Commands::Youtube {
                trend_type,
                trends_number,
                ..
            }) => {
                assert_eq!(trend_type, "Default");
                assert_eq!(trends_number, 5);
            }
            _ => panic!("expected youtube command"),
        }
    }

    #[test]
    fn test_word_command_with_period() {
        let cli = Cli::try_parse_from([
            "toptrends", "word", "Spain", "rust", "--period", "week", "--limit", "3",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Word { ref period, limit: Some(3), .. }) if period == "week"
        ));
    }
}
