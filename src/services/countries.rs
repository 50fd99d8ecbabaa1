//! Country directory: fills the `countries` table from the provider catalogues
//! the first time it is found empty.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::clients::countries::{CountriesClient, CountryInfo};
use crate::clients::google_trends::GoogleTrendsClient;
use crate::clients::twitter::{TrendCountry, TwitterClient};
use crate::db::Store;
use crate::models::NewCountry;

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z0-9]+").expect("Invalid regex"))
}

/// `united_states` → `United States`.
#[must_use]
pub fn snake_to_title(slug: &str) -> String {
    word_regex()
        .find_iter(slug)
        .map(|m| {
            let word = m.as_str().to_ascii_lowercase();
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the catalogue from the three sources.
///
/// Microblog locations and search slugs decide which names exist; the public
/// country list adds native names, flags and coordinates, matched by code
/// first and by name otherwise. Countries only the public list knows are kept
/// as well.
#[must_use]
pub fn merge_catalogue(
    trend_countries: Vec<TrendCountry>,
    search_slugs: Vec<String>,
    public_list: Vec<CountryInfo>,
) -> Vec<NewCountry> {
    let mut merged: BTreeMap<String, NewCountry> = BTreeMap::new();

    for tc in trend_countries {
        merged
            .entry(tc.name.clone())
            .or_insert_with(|| NewCountry {
                woeid: Some(tc.woeid),
                ..NewCountry::named(tc.name, tc.acronym)
            });
    }

    for slug in search_slugs {
        let name = snake_to_title(&slug);
        if name.is_empty() {
            continue;
        }
        merged
            .entry(name.clone())
            .or_insert_with(|| NewCountry::named(name, ""))
            .pn = Some(slug);
    }

    let by_code: HashMap<String, String> = merged
        .values()
        .filter(|c| !c.acronym.is_empty())
        .map(|c| (c.acronym.to_ascii_uppercase(), c.name.clone()))
        .collect();

    for info in public_list {
        let (lat, lng) = info.lat_lng();
        let existing = by_code
            .get(&info.alpha2_code.to_ascii_uppercase())
            .cloned()
            .or_else(|| merged.contains_key(&info.name).then(|| info.name.clone()));

        let entry = match existing {
            Some(name) => match merged.get_mut(&name) {
                Some(entry) => entry,
                None => continue,
            },
            None => merged
                .entry(info.name.clone())
                .or_insert_with(|| NewCountry::named(info.name.clone(), "")),
        };

        if entry.acronym.is_empty() {
            entry.acronym.clone_from(&info.alpha2_code);
        }
        if let Some(native) = info.native_name.filter(|n| !n.is_empty()) {
            entry.native_name = native;
        }
        entry.flag = entry.flag.take().or(info.flag);
        entry.lat = entry.lat.or(lat);
        entry.lng = entry.lng.or(lng);
    }

    merged.into_values().collect()
}

pub struct CountryService {
    store: Store,
    countries: Arc<CountriesClient>,
    twitter: Arc<TwitterClient>,
    google: Arc<GoogleTrendsClient>,
    load_lock: Mutex<()>,
}

impl CountryService {
    #[must_use]
    pub fn new(
        store: Store,
        countries: Arc<CountriesClient>,
        twitter: Arc<TwitterClient>,
        google: Arc<GoogleTrendsClient>,
    ) -> Self {
        Self {
            store,
            countries,
            twitter,
            google,
            load_lock: Mutex::new(()),
        }
    }

    /// Loads the catalogue if the table is empty. Source failures are logged and
    /// leave the table empty, so the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns an error only when the database fails.
    pub async fn ensure_loaded(&self) -> Result<u64, sea_orm::DbErr> {
        if self.store.count_countries().await? > 0 {
            return Ok(0);
        }

        let _guard = self.load_lock.lock().await;
        if self.store.count_countries().await? > 0 {
            return Ok(0);
        }

        let (trend_countries, hot_trends, public_list) = futures::join!(
            self.twitter.trend_countries(),
            self.google.hot_trends(),
            self.countries.all()
        );

        let trend_countries = trend_countries.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load microblog trend locations");
            Vec::new()
        });
        let search_slugs: Vec<String> = hot_trends
            .map(|m| m.into_keys().collect())
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load search trend countries");
                Vec::new()
            });
        let public_list = public_list.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load public country list");
            Vec::new()
        });

        let catalogue = merge_catalogue(trend_countries, search_slugs, public_list);
        if catalogue.is_empty() {
            warn!("No country source answered; catalogue stays empty");
            return Ok(0);
        }

        let inserted = self.store.insert_countries(&catalogue).await?;
        info!(inserted, "Country catalogue loaded");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, code: &str, native: &str) -> CountryInfo {
        CountryInfo {
            name: name.to_string(),
            native_name: Some(native.to_string()),
            alpha2_code: code.to_string(),
            flag: Some(format!("https://flagcdn.com/{}.svg", code.to_lowercase())),
            latlng: vec![1.0, 2.0],
        }
    }

    #[test]
    fn test_snake_to_title() {
        assert_eq!(snake_to_title("united_states"), "United States");
        assert_eq!(snake_to_title("spain"), "Spain");
        assert_eq!(snake_to_title("HONG_kong"), "Hong Kong");
        assert_eq!(snake_to_title("__"), "");
    }

    #[test]
    fn test_merge_combines_sources() {
        let trend_countries = vec![
            TrendCountry {
                name: "Worldwide".to_string(),
                acronym: "WW".to_string(),
                woeid: 1,
            },
            TrendCountry {
                name: "Spain".to_string(),
                acronym: "ES".to_string(),
                woeid: 23_424_950,
            },
        ];
        let slugs = vec!["spain".to_string(), "south_korea".to_string()];
        let public = vec![
            info("Spain", "ES", "España"),
            info("Korea (Republic of)", "KR", "대한민국"),
            info("Iceland", "IS", "Ísland"),
        ];

        let merged = merge_catalogue(trend_countries, slugs, public);
        let by_name: HashMap<_, _> = merged.iter().map(|c| (c.name.as_str(), c)).collect();

        let spain = by_name["Spain"];
        assert_eq!(spain.woeid, Some(23_424_950));
        assert_eq!(spain.pn.as_deref(), Some("spain"));
        assert_eq!(spain.native_name, "España");
        assert_eq!(spain.lat, Some(1.0));

        let korea = by_name["South Korea"];
        assert_eq!(korea.pn.as_deref(), Some("south_korea"));
        assert_eq!(korea.woeid, None);

        // No code and a different name: the public entry stands on its own.
        assert!(by_name.contains_key("Korea (Republic of)"));

        let iceland = by_name["Iceland"];
        assert_eq!(iceland.acronym, "IS");
        assert_eq!(iceland.woeid, None);
        assert_eq!(iceland.pn, None);

        assert_eq!(by_name["Worldwide"].acronym, "WW");
    }
}
