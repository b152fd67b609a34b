// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishcheck::domain::repositories::domain_feed::{DomainFeed, FeedError};
use phishcheck::infrastructure::feeds::ScamSnifferFeed;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::fast_retry;

fn feed(server: &MockServer) -> ScamSnifferFeed {
    ScamSnifferFeed::new(format!("{}/domains.json", server.uri()), Duration::from_secs(5))
        .unwrap()
        .with_retry_policy(fast_retry())
}

#[tokio::test]
async fn fetches_domain_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a.com", "b.io"])))
        .expect(1)
        .mount(&server)
        .await;

    let domains = feed(&server).fetch_domains().await.unwrap();
    assert_eq!(domains, vec!["a.com", "b.io"]);
}

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domains.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["late.com"])))
        .expect(1)
        .mount(&server)
        .await;

    let domains = feed(&server).fetch_domains().await.unwrap();
    assert_eq!(domains, vec!["late.com"]);
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = feed(&server).fetch_domains().await.unwrap_err();
    assert!(matches!(err, FeedError::Status(404)));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let err = feed(&server).fetch_domains().await.unwrap_err();
    assert!(matches!(err, FeedError::Decode(_)));
}
