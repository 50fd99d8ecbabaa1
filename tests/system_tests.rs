//! Integration tests for the system endpoints: status and health checks.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use toptrends::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("toptrends-system-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.countries.source_url = "http://127.0.0.1:9/all".to_string();
    config.twitter.bearer_token = None;
    config.youtube.api_key = Some("test-key".to_string());

    let state = toptrends::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    toptrends::api::router(state).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_live() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/system/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].as_bool().unwrap_or(false));
    assert_eq!(body["data"]["status"], "alive");
}

#[tokio::test]
async fn test_health_ready() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/system/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;

    let (status, body) = get(&app, "/api/system/status").await;

    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(data["database_ok"], true);
    // Status never loads the catalogue.
    assert_eq!(data["country_count"], 0);
    assert_eq!(data["providers"]["twitter_configured"], false);
    assert_eq!(data["providers"]["youtube_configured"], true);
    assert_eq!(data["cache"]["staleness_offset_minutes"], 60);
    assert_eq!(data["cache"]["effective_threshold_minutes"], 120);
    assert_eq!(data["cache"]["per_key_locking"], true);
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Metrics not enabled or failed to initialize");
}
