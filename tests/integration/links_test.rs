//! Minting and redirect tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_TOKEN, PULL_BASE, PUBLIC_BASE, T0, TestApp, test_config};

#[tokio::test]
async fn test_mint_then_redirect() {
    let app = TestApp::new();

    let (token, body) = app.mint("videos/a.mp4", Some(120)).await;
    assert_eq!(body["exp"], T0 + 120);
    assert_eq!(body["target"], format!("{PULL_BASE}/videos/a.mp4"));
    assert_eq!(body["shortUrl"], format!("{PUBLIC_BASE}/l/{token}"));

    let response = app.request("GET", &format!("/l/{token}"), None, None).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        Some(format!("{PULL_BASE}/videos/a.mp4").as_str())
    );
    assert_eq!(response.header("cache-control"), Some("no-store"));
}

#[tokio::test]
async fn test_mint_strips_leading_slashes_and_clamps_ttl() {
    let app = TestApp::new();

    let (_, short) = app.mint("///docs/report.pdf", Some(1)).await;
    assert_eq!(short["exp"], T0 + 60);
    assert_eq!(short["target"], format!("{PULL_BASE}/docs/report.pdf"));

    let (_, long) = app.mint("docs/report.pdf", Some(10_000_000)).await;
    assert_eq!(long["exp"], T0 + 86_400);

    let (_, default) = app.mint("docs/report.pdf", None).await;
    assert_eq!(default["exp"], T0 + 600);
}

#[tokio::test]
async fn test_mint_requires_admin_token() {
    let app = TestApp::new();
    let body = json!({ "path": "videos/a.mp4" });

    let missing = app.request("POST", "/api/links", Some(body.clone()), None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let wrong = app
        .request("POST", "/api/links", Some(body), Some("not-the-token"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert!(wrong.body.get("shortUrl").is_none());
}

#[tokio::test]
async fn test_mint_rejects_missing_path() {
    let app = TestApp::new();

    let empty = app
        .request("POST", "/api/links", Some(json!({ "path": "" })), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.body["error"], "VALIDATION_ERROR");

    let slashes = app
        .request("POST", "/api/links", Some(json!({ "path": "///" })), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(slashes.status, StatusCode::BAD_REQUEST);

    let absent = app
        .request("POST", "/api/links", Some(json!({})), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(absent.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mint_without_admin_token_configured() {
    let mut config = test_config();
    config.admin.api_token = String::new();
    let app = TestApp::with_config(config);

    let response = app
        .request(
            "POST",
            "/api/links",
            Some(json!({ "path": "videos/a.mp4" })),
            Some("anything"),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn test_mint_without_signing_secret() {
    let mut config = test_config();
    config.links.signing_secret = String::new();
    let app = TestApp::with_config(config);

    let response = app
        .request(
            "POST",
            "/api/links",
            Some(json!({ "path": "videos/a.mp4" })),
            Some(ADMIN_TOKEN),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_repeated_failures_lock_out_caller() {
    let app = TestApp::new();
    let body = json!({ "path": "videos/a.mp4" });
    let attacker = Some("203.0.113.9:5000");

    for _ in 0..10 {
        let response = app
            .request_from(attacker, "POST", "/api/links", Some(body.clone()), Some("guess"), &[])
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let locked = app
        .request_from(attacker, "POST", "/api/links", Some(body.clone()), Some(ADMIN_TOKEN), &[])
        .await;
    assert_eq!(locked.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(locked.body["error"], "RATE_LIMITED");

    let other = app
        .request_from(
            Some("198.51.100.7:5000"),
            "POST",
            "/api/links",
            Some(body),
            Some(ADMIN_TOKEN),
            &[],
        )
        .await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_rotating_forwarded_header_does_not_reset_lockout() {
    let app = TestApp::new();
    let body = json!({ "path": "videos/a.mp4" });
    let attacker = Some("203.0.113.9:5000");

    for i in 0..11 {
        let forwarded = format!("10.0.0.{i}");
        let response = app
            .request_from(
                attacker,
                "POST",
                "/api/links",
                Some(body.clone()),
                Some("guess"),
                &[("x-forwarded-for", forwarded.as_str())],
            )
            .await;
        let expected = if i < 10 {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::TOO_MANY_REQUESTS
        };
        assert_eq!(response.status, expected, "attempt {i}");
    }

    let locked = app
        .request_from(
            attacker,
            "POST",
            "/api/links",
            Some(body),
            Some(ADMIN_TOKEN),
            &[("x-forwarded-for", "10.0.0.99")],
        )
        .await;
    assert_eq!(locked.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_local_proxy_keys_callers_by_forwarded_hop() {
    let app = TestApp::new();
    let body = json!({ "path": "videos/a.mp4" });
    let proxy = Some("127.0.0.1:40000");

    for _ in 0..10 {
        let response = app
            .request_from(
                proxy,
                "POST",
                "/api/links",
                Some(body.clone()),
                Some("guess"),
                &[("x-forwarded-for", "10.9.9.9, 203.0.113.9")],
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let locked = app
        .request_from(
            proxy,
            "POST",
            "/api/links",
            Some(body.clone()),
            Some(ADMIN_TOKEN),
            &[("x-forwarded-for", "1.2.3.4, 203.0.113.9")],
        )
        .await;
    assert_eq!(locked.status, StatusCode::TOO_MANY_REQUESTS);

    let other = app
        .request_from(
            proxy,
            "POST",
            "/api/links",
            Some(body),
            Some(ADMIN_TOKEN),
            &[("x-forwarded-for", "198.51.100.7")],
        )
        .await;
    assert_eq!(other.status, StatusCode::OK);
}

#[tokio::test]
async fn test_mint_hides_parser_detail() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/links", Some(json!({ "path": 5 })), Some(ADMIN_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.body["message"], "Invalid request body");
    assert!(!response.text.contains("invalid type"));
}

#[tokio::test]
async fn test_redirect_rejects_malformed_token() {
    let app = TestApp::new();

    for token in ["nodot", "a.", ".b", "a.b.c", "a+b.c"] {
        let response = app.request("GET", &format!("/l/{token}"), None, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{token}");
        assert_eq!(response.text, "Bad token");
    }
}

#[tokio::test]
async fn test_redirect_rejects_tampered_token() {
    let app = TestApp::new();
    let (token, _) = app.mint("videos/a.mp4", None).await;
    let (other, _) = app.mint("videos/secret.mp4", None).await;

    let (payload, _) = other.split_once('.').unwrap();
    let (_, signature) = token.split_once('.').unwrap();
    let forged = format!("{payload}.{signature}");

    let response = app.request("GET", &format!("/l/{forged}"), None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Invalid signature");
    assert!(response.header("location").is_none());
}

#[tokio::test]
async fn test_redirect_expiry_boundary() {
    let app = TestApp::new();
    let (token, body) = app.mint("videos/a.mp4", Some(120)).await;
    let exp = body["exp"].as_i64().unwrap();
    let uri = format!("/l/{token}");

    app.clock.set(exp);
    let at_expiry = app.request("GET", &uri, None, None).await;
    assert_eq!(at_expiry.status, StatusCode::FOUND);

    app.clock.set(exp + 1);
    let after = app.request("GET", &uri, None, None).await;
    assert_eq!(after.status, StatusCode::GONE);
    assert_eq!(after.text, "Link expired");
}

#[tokio::test]
async fn test_redirect_without_signing_secret() {
    let mut config = test_config();
    config.links.signing_secret = String::new();
    let app = TestApp::with_config(config);

    let response = app.request("GET", "/l/abc.def", None, None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text, "Server misconfigured");
}

#[tokio::test]
async fn test_redirect_needs_no_admin_token() {
    let app = TestApp::new();
    let (token, _) = app.mint("videos/a.mp4", None).await;

    let response = app
        .request("GET", &format!("/l/{token}"), None, Some("wrong"))
        .await;
    assert_eq!(response.status, StatusCode::FOUND);
}
