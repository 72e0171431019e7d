//! Fixture server replaying recorded host.io responses.
//!
//! Serves the payloads under `fixtures/` for `example.com` (and for the
//! `ns = google.com` domains search), rejects requests without the expected
//! bearer token, and can hold every response back by a fixed latency so
//! clients can exercise timeouts and cancellation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const WEB_FIXTURE: &str = include_str!("../fixtures/web.json");
pub const DNS_FIXTURE: &str = include_str!("../fixtures/dns.json");
pub const RELATED_FIXTURE: &str = include_str!("../fixtures/related.json");
pub const FULL_FIXTURE: &str = include_str!("../fixtures/full.json");
pub const DOMAINS_FIXTURE: &str = include_str!("../fixtures/domains.json");

/// Domain for which every single-domain fixture is served.
pub const FIXTURE_DOMAIN: &str = "example.com";

/// Pager the domains fixture was recorded with (`limit`, `page`).
pub const FIXTURE_PAGER: (u32, u32) = (5, 5);

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub token: String,
    pub latency: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            token: "secret".to_string(),
            latency: Duration::ZERO,
        }
    }
}

impl MockConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

type Shared = Arc<MockConfig>;

pub fn app(config: MockConfig) -> Router {
    Router::new()
        .route("/web/{domain}", get(web))
        .route("/dns/{domain}", get(dns))
        .route("/related/{domain}", get(related))
        .route("/full/{domain}", get(full))
        .route("/domains/{field}/{value}", get(domains))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    info!(addr = ?listener.local_addr().ok(), "host.io fixture server listening");
    axum::serve(listener, app(config)).await
}

async fn web(State(config): State<Shared>, headers: HeaderMap, Path(domain): Path<String>) -> Response {
    serve_domain(&config, &headers, "web", &domain, WEB_FIXTURE).await
}

async fn dns(State(config): State<Shared>, headers: HeaderMap, Path(domain): Path<String>) -> Response {
    serve_domain(&config, &headers, "dns", &domain, DNS_FIXTURE).await
}

async fn related(
    State(config): State<Shared>,
    headers: HeaderMap,
    Path(domain): Path<String>,
) -> Response {
    serve_domain(&config, &headers, "related", &domain, RELATED_FIXTURE).await
}

async fn full(State(config): State<Shared>, headers: HeaderMap, Path(domain): Path<String>) -> Response {
    serve_domain(&config, &headers, "full", &domain, FULL_FIXTURE).await
}

async fn domains(
    State(config): State<Shared>,
    headers: HeaderMap,
    Path((field, value)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&config, &headers).and_then(|()| negotiate(&headers)) {
        return rejection;
    }
    let mut pager = [None, None];
    for (slot, key) in pager.iter_mut().zip(["limit", "page"]) {
        if let Some(raw) = query.get(key) {
            match raw.parse::<u32>() {
                Ok(n) => *slot = Some(n),
                Err(_) => {
                    return (StatusCode::BAD_REQUEST, format!("invalid {key}: {raw}")).into_response()
                }
            }
        }
    }
    tokio::time::sleep(config.latency).await;
    debug!(%field, %value, ?query, "serving domains fixture");
    let recorded = [Some(FIXTURE_PAGER.0), Some(FIXTURE_PAGER.1)];
    if field == "ns" && value == "google.com" && pager == recorded {
        json(DOMAINS_FIXTURE)
    } else {
        (StatusCode::NOT_FOUND, "not found").into_response()
    }
}

async fn serve_domain(
    config: &MockConfig,
    headers: &HeaderMap,
    resource: &str,
    domain: &str,
    fixture: &'static str,
) -> Response {
    if let Err(rejection) = authorize(config, headers).and_then(|()| negotiate(headers)) {
        return rejection;
    }
    tokio::time::sleep(config.latency).await;
    debug!(resource, domain, "serving fixture");
    if domain == FIXTURE_DOMAIN {
        json(fixture)
    } else {
        (StatusCode::NOT_FOUND, "not found").into_response()
    }
}

fn authorize(config: &MockConfig, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", config.token);
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if supplied == Some(expected.as_str()) {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "unauthorized").into_response())
    }
}

/// The API only speaks JSON: `Accept` and `Content-Type` must both say so.
fn negotiate(headers: &HeaderMap) -> Result<(), Response> {
    let is_json = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"))
    };
    if !is_json(header::ACCEPT) {
        return Err((StatusCode::NOT_ACCEPTABLE, "expected Accept: application/json").into_response());
    }
    if !is_json(header::CONTENT_TYPE) {
        return Err((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "expected Content-Type: application/json",
        )
            .into_response());
    }
    Ok(())
}

fn json(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
