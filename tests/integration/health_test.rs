//! Health endpoint tests.

use axum::http::StatusCode;

use crate::helpers::{ADMIN_TOKEN, PUBLIC_BASE, SIGNING_SECRET, TestApp, test_config};

#[tokio::test]
async fn test_health_when_configured() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert_eq!(response.body["version"], "1");
    assert_eq!(response.body["env"]["publicBase"], PUBLIC_BASE);
    assert_eq!(response.body["env"]["signingSet"], true);
    assert_eq!(response.body["env"]["pullBaseSet"], true);
    assert_eq!(response.body["env"]["adminSet"], true);
}

#[tokio::test]
async fn test_health_reports_missing_settings() {
    let mut config = test_config();
    config.links.pull_base = String::new();
    let app = TestApp::with_config(config);

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["ok"], false);
    assert_eq!(response.body["env"]["pullBaseSet"], false);
    assert_eq!(response.body["env"]["signingSet"], true);
}

#[tokio::test]
async fn test_health_never_echoes_secrets() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert!(!response.text.contains(SIGNING_SECRET));
    assert!(!response.text.contains(ADMIN_TOKEN));
}
