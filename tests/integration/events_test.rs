//! Event ingestion, summary and job status tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_TOKEN, TestApp, test_config};

#[tokio::test]
async fn test_ingest_requires_admin() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/events", Some(json!({ "jobId": "job-1" })), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let listed = app.request("GET", "/api/events", None, None).await;
    assert_eq!(listed.status, StatusCode::UNAUTHORIZED);

    let summary = app.request("GET", "/api/summary", None, None).await;
    assert_eq!(summary.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ingest_and_list_events() {
    let app = TestApp::new();

    let created = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "nodeId": "node-1",
                "jobId": "job-1",
                "stage": "transcode",
                "status": "running",
                "progress": 40,
                "bytes": 1024
            })),
            Some(ADMIN_TOKEN),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.text);
    assert_eq!(created.body["actor"], "worker");
    assert!(created.body["id"].is_string());

    app.request(
        "POST",
        "/api/events",
        Some(json!({ "userId": "alice", "jobId": "job-2", "status": "queued" })),
        Some(ADMIN_TOKEN),
    )
    .await;

    let all = app
        .request("GET", "/api/events", None, Some(ADMIN_TOKEN))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["count"], 2);
    assert_eq!(all.body["events"][0]["jobId"], "job-2");

    let workers = app
        .request("GET", "/api/events?actor=worker", None, Some(ADMIN_TOKEN))
        .await;
    assert_eq!(workers.body["count"], 1);
    assert_eq!(workers.body["events"][0]["nodeId"], "node-1");

    let by_job = app
        .request("GET", "/api/events?jobId=job-2&limit=5", None, Some(ADMIN_TOKEN))
        .await;
    assert_eq!(by_job.body["count"], 1);
}

#[tokio::test]
async fn test_ingest_rejects_invalid_events() {
    let app = TestApp::new();

    let anonymous = app
        .request("POST", "/api/events", Some(json!({ "stage": "upload" })), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(anonymous.status, StatusCode::BAD_REQUEST);
    assert_eq!(anonymous.body["error"], "VALIDATION_ERROR");

    let progress = app
        .request(
            "POST",
            "/api/events",
            Some(json!({ "jobId": "job-1", "progress": 140 })),
            Some(ADMIN_TOKEN),
        )
        .await;
    assert_eq!(progress.status, StatusCode::BAD_REQUEST);

    let mistyped = app
        .request("POST", "/api/events", Some(json!({ "jobId": 7 })), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(mistyped.status, StatusCode::BAD_REQUEST);
    assert_eq!(mistyped.body["message"], "Invalid request body");

    let query = app
        .request("GET", "/api/events?limit=abc", None, Some(ADMIN_TOKEN))
        .await;
    assert_eq!(query.status, StatusCode::BAD_REQUEST);
    assert_eq!(query.body["error"], "VALIDATION_ERROR");
    assert_eq!(query.body["message"], "Invalid query string");
}

#[tokio::test]
async fn test_job_status_is_public() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/jobs/job-9", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "NOT_FOUND");

    for (status, progress, bytes) in [("running", 50, 500), ("done", 100, 250)] {
        app.request(
            "POST",
            "/api/events",
            Some(json!({
                "nodeId": "node-1",
                "jobId": "job-9",
                "status": status,
                "progress": progress,
                "bytes": bytes
            })),
            Some(ADMIN_TOKEN),
        )
        .await;
        app.clock.advance(5);
    }

    let found = app.request("GET", "/api/jobs/job-9", None, None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["jobId"], "job-9");
    assert_eq!(found.body["status"], "done");
    assert_eq!(found.body["bytes"], 750);
    assert_eq!(found.body["eventCount"], 2);
    assert_eq!(found.body["events"][0]["status"], "done");
    assert_eq!(found.body["finished"], true);
    assert!(found.body["events"][0].get("nodeId").is_none());
    assert!(!found.text.contains("node-1"));
}

#[tokio::test]
async fn test_summary_counts_recent_activity() {
    let app = TestApp::new();

    let events = [
        json!({ "nodeId": "node-1", "jobId": "a", "status": "running", "bytes": 2_000_000_000u64 }),
        json!({ "nodeId": "node-2", "jobId": "b", "status": "done" }),
        json!({ "userId": "alice", "jobId": "c", "status": "queued" }),
    ];
    for event in events {
        let response = app
            .request("POST", "/api/events", Some(event), Some(ADMIN_TOKEN))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let summary = app
        .request("GET", "/api/summary", None, Some(ADMIN_TOKEN))
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.body["events24h"], 3);
    assert_eq!(summary.body["workersOnline"], 2);
    assert_eq!(summary.body["usersActive"], 1);
    assert_eq!(summary.body["bandwidthBytes"], 2_000_000_000u64);
    assert_eq!(summary.body["jobs"]["running"], 1);
    assert_eq!(summary.body["jobs"]["done"], 1);
    assert_eq!(summary.body["jobs"]["queued"], 1);
}

#[tokio::test]
async fn test_status_page_is_static_html() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/status/%3Cscript%3Ealert(1)%3C%2Fscript%3E", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("text/html"))
    );
    assert!(response.text.contains("/api/jobs/"));
    assert!(!response.text.contains("alert(1)"));
}

#[tokio::test]
async fn test_api_request_limit() {
    let mut config = test_config();
    config.admin.request_limit.per_minute = 3;
    let app = TestApp::with_config(config);

    for _ in 0..3 {
        let response = app.request("GET", "/api/jobs/none", None, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
    let limited = app.request("GET", "/api/jobs/none", None, None).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);

    // Redirects and health are outside the limited scope.
    let health = app.request("GET", "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
}

#[tokio::test]
async fn test_cors_preflight_on_api() {
    let mut config = test_config();
    config.server.cors.allowed_origins = vec!["https://admin.example.com".into()];
    let app = TestApp::with_config(config);

    let response = app
        .request_with(
            "OPTIONS",
            "/api/links",
            None,
            None,
            &[
                ("origin", "https://admin.example.com"),
                ("access-control-request-method", "POST"),
            ],
        )
        .await;
    assert_eq!(
        response.header("access-control-allow-origin"),
        Some("https://admin.example.com")
    );
}
