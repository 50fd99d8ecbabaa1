//! Trend query command handlers

use crate::config::Config;
use crate::models::PeriodType;
use crate::services::WordQuery;
use crate::state::SharedState;

fn print_empty(country: &str) {
    println!("No trends for '{country}'.");
    println!("Country names are case sensitive; see `toptrends countries`.");
}

pub async fn cmd_twitter(config: Config, country: &str, trends_number: u32) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let trends = state
        .trend_service
        .twitter_trends(country, trends_number)
        .await?;

    if trends.is_empty() {
        print_empty(country);
        return Ok(());
    }

    for (i, trend) in trends.iter().enumerate() {
        let volume = trend
            .tweet_volume
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        println!("{:>2}. {} ({} posts)", i + 1, trend.name, volume);
        println!("    {}", trend.url);
    }

    Ok(())
}

pub async fn cmd_google(config: Config, country: &str, trends_number: u32) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let trends = state
        .trend_service
        .google_trends(country, trends_number)
        .await?;

    if trends.is_empty() {
        print_empty(country);
        return Ok(());
    }

    for (i, trend) in trends.iter().enumerate() {
        println!("{:>2}. {}", i + 1, trend.name);
    }

    Ok(())
}

pub async fn cmd_word(
    config: Config,
    country: &str,
    word: &str,
    period: &str,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let period: PeriodType = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let state = SharedState::new(config).await?;
    let points = state
        .trend_service
        .google_word_trends(
            country,
            WordQuery {
                word: word.to_string(),
                period,
                limit,
            },
        )
        .await?;

    if points.is_empty() {
        print_empty(country);
        return Ok(());
    }

    println!("Interest in '{}' ({}, {})", word, country, period.timeframe());
    println!("{:-<50}", "");

    for point in points {
        let bar = "#".repeat(usize::try_from(point.value.clamp(0, 100) / 2).unwrap_or(0));
        println!(
            "{}  {:>3} {}",
            point.timestamp.format("%Y-%m-%d %H:%M"),
            point.value,
            bar
        );
    }

    Ok(())
}

pub async fn cmd_youtube(
    config: Config,
    country: &str,
    trend_type: &str,
    trends_number: u32,
) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let videos = state
        .trend_service
        .youtube_trends(country, trend_type, trends_number)
        .await?;

    if videos.is_empty() {
        print_empty(country);
        return Ok(());
    }

    for (i, video) in videos.iter().enumerate() {
        println!("{:>2}. {}", i + 1, video.title);
        println!(
            "    {} | {} | views: {}",
            video.channel_title,
            video.published_at.format("%Y-%m-%d"),
            video
                .view_count
                .map_or_else(|| "-".to_string(), |v| v.to_string())
        );
    }

    Ok(())
}
