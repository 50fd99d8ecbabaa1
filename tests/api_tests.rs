use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use toptrends::config::Config;
use toptrends::models::{GoogleTrend, InterestPoint, NewCountry, TwitterTrend, YouTubeVideo};
use toptrends::services::{Providers, TrendKind, TrendProvider};
use tower::ServiceExt;

struct Fixed<T>(Vec<T>);

#[async_trait::async_trait]
impl<K> TrendProvider<K> for Fixed<K::Item>
where
    K: TrendKind,
    K::Item: Clone,
{
    async fn fetch_trends(&self, _key: &K::Key, _params: &K::Params) -> anyhow::Result<Vec<K::Item>> {
        Ok(self.0.clone())
    }
}

fn providers() -> Providers {
    let twitter: Vec<TwitterTrend> = (1..=20)
        .map(|i| TwitterTrend {
            name: format!("#topic{i}"),
            url: format!("https://example.com/search?q=topic{i}"),
            tweet_volume: None,
        })
        .collect();
    let google: Vec<GoogleTrend> = (1..=20)
        .map(|i| GoogleTrend {
            name: format!("search {i}"),
        })
        .collect();

    Providers {
        twitter: Arc::new(Fixed(twitter)),
        google: Arc::new(Fixed(google)),
        google_word: Arc::new(Fixed(Vec::<InterestPoint>::new())),
        youtube: Arc::new(Fixed(Vec::<YouTubeVideo>::new())),
    }
}

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("toptrends-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.countries.source_url = "http://127.0.0.1:9/all".to_string();

    let state = toptrends::api::create_app_state_with_providers(config, providers(), None)
        .await
        .expect("Failed to create app state");

    let spain = NewCountry {
        woeid: Some(23_424_950),
        pn: Some("spain".to_string()),
        ..NewCountry::named("Spain", "ES")
    };
    let united_states = NewCountry {
        woeid: Some(23_424_977),
        pn: Some("united_states".to_string()),
        ..NewCountry::named("United States", "US")
    };
    state
        .store()
        .insert_countries(&[spain, united_states])
        .await
        .expect("Failed to seed countries");

    toptrends::api::router(state).await
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_list_countries() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/countries").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, ["Spain", "United States"]);
    assert_eq!(body["data"][0]["acronym"], "ES");
}

#[tokio::test]
async fn test_twitter_trends_default_and_explicit_number() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/countries/Spain/trends/twitter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0]["name"], "#topic1");

    let (status, body) = get_json(
        &app,
        "/api/countries/Spain/trends/twitter?trends_number=12",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_country_names_with_spaces() {
    let app = spawn_app().await;

    let (status, body) = get_json(
        &app,
        "/api/countries/United%20States/trends/google?trends_number=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][2]["name"], "search 3");
}

#[tokio::test]
async fn test_unknown_country_returns_empty_list() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/countries/Narnia/trends/twitter").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_invalid_trends_number_is_bad_request() {
    let app = spawn_app().await;

    for uri in [
        "/api/countries/Spain/trends/twitter?trends_number=0",
        "/api/countries/Spain/trends/google?trends_number=51",
        "/api/countries/Spain/trends/youtube?trends_number=0",
    ] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(!body["success"].as_bool().unwrap_or(true));
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_word_trends_validation() {
    let app = spawn_app().await;

    let (status, _) = get_json(&app, "/api/countries/Spain/trends/google/word").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(
        &app,
        "/api/countries/Spain/trends/google/word?word=rust&period_type=decade",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(
        &app,
        "/api/countries/Spain/trends/google/word?word=rust&limit=0",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(
        &app,
        "/api/countries/Spain/trends/google/word?word=rust&period_type=week",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_youtube_trend_types() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/youtube/trend-types").await;

    assert_eq!(status, StatusCode::OK);
    let types = body["data"].as_array().unwrap();
    assert_eq!(types.len(), 8);
    assert!(
        types
            .iter()
            .any(|t| t["name"] == "Default" && t["category_id"] == 0)
    );
    assert!(
        types
            .iter()
            .any(|t| t["name"] == "Music" && t["category_id"] == 10)
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = spawn_app().await;

    let (status, body) = get_json(&app, "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body["success"].as_bool().unwrap_or(true));
}
