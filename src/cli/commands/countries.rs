//! Country and trend type listing

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_list_countries(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let countries = state.trend_service.list_countries().await?;

    if countries.is_empty() {
        println!("No countries available.");
        println!();
        println!("The catalogue is loaded from the providers on first use; check connectivity.");
        return Ok(());
    }

    println!("Countries ({} total)", countries.len());
    println!("{:-<70}", "");

    for country in countries {
        let mut sources = Vec::new();
        if country.woeid.is_some() {
            sources.push("twitter");
        }
        if country.pn.is_some() {
            sources.push("google");
        }
        if !country.acronym.is_empty() {
            sources.push("youtube");
        }

        println!(
            "{:<4} {:<40} {}",
            country.acronym,
            country.name,
            sources.join(", ")
        );
    }

    Ok(())
}

pub async fn cmd_list_trend_types(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let types = state.trend_service.youtube_trend_types().await?;

    for trend_type in types {
        match trend_type.category_filter() {
            Some(category) => println!("{} (category {})", trend_type.name, category),
            None => println!("{} (all categories)", trend_type.name),
        }
    }

    Ok(())
}
