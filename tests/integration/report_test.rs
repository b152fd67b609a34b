// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishcheck::config::settings::ReportSettings;
use phishcheck::domain::models::phishing_site::SiteSource;
use phishcheck::domain::services::lookup_matcher::LookupMatcher;
use phishcheck::workers::report_worker::sign;
use phishcheck::workers::report_channel;
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::cache_with;

fn settings(endpoint: String, secret: Option<&str>) -> ReportSettings {
    ReportSettings {
        enabled: true,
        endpoint,
        secret: secret.map(str::to_string),
        queue_capacity: 16,
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn matches_are_reported_with_signature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conf"))
        .and(header_exists("X-Report-Signature"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (queue, worker) = report_channel(&settings(server.uri(), Some("report-key"))).unwrap();
    let handle = worker.start();

    let cache = cache_with(&[("evil.com", SiteSource::Fixed)]);
    let matcher = LookupMatcher::new(cache).with_reporter(Arc::new(queue));
    let results = matcher.check(&["EVIL.com".to_string(), "safe.org".to_string()]);
    assert_eq!(results.len(), 1);

    // 释放最后一个发送端后工作器排空队列并退出
    drop(matcher);
    handle.await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let body: Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["comm"]["user_id"], 0);
    assert_eq!(body["list"].as_array().unwrap().len(), 1);
    assert_eq!(body["list"][0]["op_obj_type"], 31);
    assert_eq!(body["list"][0]["op_obj_value"]["url"], "EVIL.com");
    assert_eq!(body["list"][0]["op_obj_value"]["source"], "fixed-sniffer");
    assert!(body["list"][0]["timestamp_"].as_i64().unwrap() > 0);

    assert_eq!(sign("report-key", &request.body).unwrap().len(), 64);
}

#[tokio::test]
async fn no_report_when_nothing_matches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (queue, worker) = report_channel(&settings(server.uri(), None)).unwrap();
    let handle = worker.start();

    let matcher = LookupMatcher::new(cache_with(&[])).with_reporter(Arc::new(queue));
    assert!(matcher.check(&["safe.org".to_string()]).is_empty());

    drop(matcher);
    handle.await.unwrap();
}

#[tokio::test]
async fn failed_delivery_does_not_affect_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (queue, worker) = report_channel(&settings(server.uri(), None)).unwrap();
    let handle = worker.start();

    let matcher = LookupMatcher::new(cache_with(&[("evil.com", SiteSource::Remote)]))
        .with_reporter(Arc::new(queue));
    let results = matcher.check(&["www.evil.com".to_string()]);
    assert_eq!(results[0].domain, "evil.com");

    drop(matcher);
    handle.await.unwrap();
}
