use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub native_name: String,
    pub acronym: String,
    pub flag: Option<String>,
    /// Microblog location id; countries without one have no microblog trends.
    pub woeid: Option<i32>,
    /// Daily search trends slug; countries without one have no daily search trends.
    pub pn: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Country row assembled from the provider catalogues before insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCountry {
    pub name: String,
    pub native_name: String,
    pub acronym: String,
    pub flag: Option<String>,
    pub woeid: Option<i32>,
    pub pn: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl NewCountry {
    #[must_use]
    pub fn named(name: impl Into<String>, acronym: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            native_name: name.clone(),
            name,
            acronym: acronym.into(),
            ..Default::default()
        }
    }
}
