//! Request logging and the Prometheus endpoint.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

/// `GET /api/metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Trend kind served by a route template, `none` for everything else.
fn trend_kind(route: Option<&str>) -> &'static str {
    match route {
        Some("/api/countries/{name}/trends/twitter") => "twitter",
        Some("/api/countries/{name}/trends/google") => "google",
        Some("/api/countries/{name}/trends/google/word") => "google_word",
        Some("/api/countries/{name}/trends/youtube") => "youtube",
        _ => "none",
    }
}

const fn outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400..=499 => "client_error",
        _ => "success",
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    // Country names are part of the path, so metrics use the route template.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let kind = trend_kind(route.as_deref());

    let span = info_span!(
        "request",
        %request_id,
        %method,
        %path,
        route = route.as_deref().unwrap_or("unmatched"),
        trend_kind = kind,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        let labels = [
            ("method", method),
            ("route", route.unwrap_or_else(|| "unmatched".to_string())),
            ("trend_kind", kind.to_string()),
            ("status", status.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        info!(
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            outcome = outcome(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_kind_from_route() {
        assert_eq!(
            trend_kind(Some("/api/countries/{name}/trends/google/word")),
            "google_word"
        );
        assert_eq!(
            trend_kind(Some("/api/countries/{name}/trends/youtube")),
            "youtube"
        );
        assert_eq!(trend_kind(Some("/api/countries")), "none");
        assert_eq!(trend_kind(None), "none");
    }

    #[test]
    fn test_outcome_by_status() {
        assert_eq!(outcome(200), "success");
        assert_eq!(outcome(400), "client_error");
        assert_eq!(outcome(503), "error");
    }
}
