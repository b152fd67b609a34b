// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use phishcheck::domain::services::lookup_matcher::LookupMatcher;
use phishcheck::infrastructure::cache::DomainCache;
use phishcheck::presentation::routes;
use serde_json::Value;
use std::sync::Arc;

/// 健康检查测试
///
/// 验证健康检查和运行状态端点是否正常工作
#[tokio::test]
async fn health_check_works() {
    let matcher = Arc::new(LookupMatcher::new(Arc::new(DomainCache::new())));
    let server = TestServer::new(routes::routes(matcher)).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");

    let response = server.get("/working").await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["date"].as_i64().unwrap() > 0);

    let response = server.get("/v1/version").await;
    response.assert_status_ok();
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}
