//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use linkhub_api::{AppState, build_app};
use linkhub_core::config::AppConfig;
use linkhub_core::traits::ManualClock;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const PULL_BASE: &str = "https://cdn.example.com";
pub const PUBLIC_BASE: &str = "https://links.example.com";
pub const T0: i64 = 1_700_000_000;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock shared with every time-dependent component
    pub clock: Arc<ManualClock>,
    /// Application state, for direct inspection
    pub state: AppState,
}

/// A buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Fully configured settings used by most tests
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.links.signing_secret = SIGNING_SECRET.into();
    config.links.pull_base = PULL_BASE.into();
    config.links.public_base = PUBLIC_BASE.into();
    config.admin.api_token = ADMIN_TOKEN.into();
    config.normalized()
}

impl TestApp {
    /// Create a fully configured test application
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a test application from explicit settings
    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::at(T0));
        let state = AppState::with_clock(config, clock.clone());
        Self {
            router: build_app(state.clone()),
            clock,
            state,
        }
    }

    /// Send a request with optional JSON body and bearer token
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with(method, uri, body, token, &[]).await
    }

    /// Like [`request`](Self::request) with extra headers
    pub async fn request_with(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        self.request_from(None, method, uri, body, token, headers).await
    }

    /// Send a request as if it arrived over a connection from `peer`
    pub async fn request_from(
        &self,
        peer: Option<&str>,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let mut request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        if let Some(peer) = peer {
            let addr: SocketAddr = peer.parse().unwrap();
            request.extensions_mut().insert(ConnectInfo(addr));
        }
        self.send(request).await
    }

    /// Send a prepared request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }

    /// Mint a link through the API and return its token
    pub async fn mint(&self, path: &str, expires_in: Option<i64>) -> (String, Value) {
        let mut body = serde_json::json!({ "path": path });
        if let Some(ttl) = expires_in {
            body["expiresIn"] = ttl.into();
        }
        let response = self
            .request("POST", "/api/links", Some(body), Some(ADMIN_TOKEN))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        let short_url = response.body["shortUrl"].as_str().unwrap().to_string();
        let token = short_url
            .rsplit_once("/l/")
            .map(|(_, token)| token.to_string())
            .unwrap();
        (token, response.body)
    }
}
