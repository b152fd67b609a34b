// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishcheck::application::tasks::{
    register_business_tasks, IMPORT_PHISHING_SITES_TASK, LOAD_PHISHING_SITES_TASK,
};
use phishcheck::domain::models::phishing_site::{remote_object_key, SiteSource};
use phishcheck::domain::models::task::TaskDefinition;
use phishcheck::domain::repositories::storage_repository::StorageRepository;
use phishcheck::domain::services::cache_refresher::CacheRefresher;
use phishcheck::domain::services::import_service::ImportService;
use phishcheck::domain::services::lookup_matcher::LookupMatcher;
use phishcheck::infrastructure::cache::DomainCache;
use phishcheck::infrastructure::feeds::ScamSnifferFeed;
use phishcheck::infrastructure::storage::{InMemoryStorage, LocalStorage};
use phishcheck::scheduler::{Scheduler, TaskRegistry};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{fast_options, fast_retry};

async fn feed_server(domains: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/domains.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(domains))
        .mount(&server)
        .await;
    server
}

fn feed(server: &MockServer) -> Arc<ScamSnifferFeed> {
    Arc::new(
        ScamSnifferFeed::new(format!("{}/domains.json", server.uri()), Duration::from_secs(5))
            .unwrap()
            .with_retry_policy(fast_retry()),
    )
}

/// 导入写入的键与刷新读取的键一致，远端条目覆盖同名固定条目
#[tokio::test]
async fn import_then_refresh_then_lookup() {
    let server = feed_server(json!(["Shared.com", "www.remote.io", "  "])).await;
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn StorageRepository> = Arc::new(LocalStorage::new(dir.path()));

    let imported = ImportService::new(feed(&server), storage.clone(), "prod")
        .import()
        .await
        .unwrap();
    assert_eq!(imported, 3);
    assert!(dir.path().join(remote_object_key("prod")).is_file());

    let cache = Arc::new(DomainCache::new());
    let refresher = CacheRefresher::new(
        cache.clone(),
        storage,
        vec!["shared.com".to_string(), "Fixed.io".to_string()],
        "prod",
    );
    let report = refresher.refresh().await.unwrap();
    assert_eq!(report.fixed, 2);
    assert_eq!(report.remote, 2);
    assert_eq!(cache.len(), 3);

    let matcher = LookupMatcher::new(cache);
    let results = matcher.check(&[
        "shared.com".to_string(),
        "remote.io".to_string(),
        "fixed.io".to_string(),
        "other.net".to_string(),
    ]);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].source, SiteSource::Remote);
    assert_eq!(results[1].domain, "www.remote.io");
    assert_eq!(results[2].source, SiteSource::Fixed);
}

/// 通过调度器的一次性任务完成导入和刷新
#[tokio::test]
async fn scheduled_tasks_populate_cache() {
    let server = feed_server(json!(["scheduled.com"])).await;
    let storage: Arc<dyn StorageRepository> = Arc::new(InMemoryStorage::new());
    let cache = Arc::new(DomainCache::new());

    let refresher = Arc::new(CacheRefresher::new(
        cache.clone(),
        storage.clone(),
        vec!["fixed.io".to_string()],
        "test",
    ));
    let importer = Arc::new(ImportService::new(feed(&server), storage.clone(), "test"));

    let mut registry = TaskRegistry::new();
    register_business_tasks(&mut registry, refresher, Some(importer.clone()));

    // 先把远端列表放入对象存储，刷新任务才能读到
    importer.import().await.unwrap();

    let mut scheduler = Scheduler::new(registry, fast_options());
    scheduler
        .load_from_config(&[
            TaskDefinition::once("LoadPhishingSites2CacheTask", LOAD_PHISHING_SITES_TASK),
            TaskDefinition::cron("Import", "0 0 0 1 1 *", IMPORT_PHISHING_SITES_TASK).disabled(),
        ])
        .unwrap();
    scheduler.start();

    tokio::time::sleep(Duration::from_millis(500)).await;
    scheduler.stop();

    let matcher = LookupMatcher::new(cache);
    assert_eq!(matcher.check(&["scheduled.com".to_string()]).len(), 1);
    assert_eq!(matcher.check(&["www.fixed.io".to_string()]).len(), 1);
}
