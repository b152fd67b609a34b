// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum_test::TestServer;
use phishcheck::domain::models::phishing_site::SiteSource;
use phishcheck::domain::services::lookup_matcher::LookupMatcher;
use phishcheck::presentation::routes;
use serde_json::{json, Value};
use std::sync::Arc;

use super::helpers::cache_with;

const CHECK_PATH: &str = "/browserext/phishing_sites/check";

fn server() -> TestServer {
    let cache = cache_with(&[
        ("evil.com", SiteSource::Fixed),
        ("www.phish.io", SiteSource::Remote),
    ]);
    TestServer::new(routes::routes(Arc::new(LookupMatcher::new(cache)))).unwrap()
}

#[tokio::test]
async fn check_returns_matches_in_request_order() {
    let server = server();

    let response = server
        .post(CHECK_PATH)
        .json(&json!(["phish.io", "safe.org", "  EVIL.com  "]))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!([
            { "query": "phish.io", "domain": "www.phish.io", "source": "scam-sniffer" },
            { "query": "  EVIL.com  ", "domain": "evil.com", "source": "fixed-sniffer" }
        ])
    );
}

#[tokio::test]
async fn check_with_no_matches_returns_empty_array() {
    let server = server();

    let response = server.post(CHECK_PATH).json(&json!(["safe.org"])).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn check_rejects_non_array_body() {
    let server = server();

    let response = server
        .post(CHECK_PATH)
        .json(&json!({ "domains": ["evil.com"] }))
        .expect_failure()
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}
