use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::config::CountriesConfig;

/// Entry of the public country list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    pub name: String,
    #[serde(default)]
    pub native_name: Option<String>,
    pub alpha2_code: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub latlng: Vec<f64>,
}

impl CountryInfo {
    #[must_use]
    pub fn lat_lng(&self) -> (Option<f64>, Option<f64>) {
        match self.latlng.as_slice() {
            [lat, lng, ..] => (Some(*lat), Some(*lng)),
            _ => (None, None),
        }
    }
}

#[derive(Clone)]
pub struct CountriesClient {
    client: Client,
    source_url: String,
}

impl CountriesClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &CountriesConfig) -> Self {
        Self {
            client,
            source_url: config.source_url.clone(),
        }
    }

    pub async fn all(&self) -> Result<Vec<CountryInfo>> {
        let response = self.client.get(&self.source_url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Country list error: {} - {}", status, body));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_payload() {
        let json = r#"[
            {"name":"Spain","nativeName":"España","alpha2Code":"ES",
             "flag":"https://flagcdn.com/es.svg","latlng":[40.0,-4.0]},
            {"name":"Antarctica","alpha2Code":"AQ","latlng":[]}
        ]"#;

        let countries: Vec<CountryInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(countries[0].native_name.as_deref(), Some("España"));
        assert_eq!(countries[0].lat_lng(), (Some(40.0), Some(-4.0)));
        assert_eq!(countries[1].lat_lng(), (None, None));
        assert!(countries[1].flag.is_none());
    }
}
