// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use phishcheck::application::tasks::register_business_tasks;
use phishcheck::config::settings::Settings;
use phishcheck::domain::models::task::TaskDefinition;
use phishcheck::domain::services::cache_refresher::CacheRefresher;
use phishcheck::domain::services::import_service::ImportService;
use phishcheck::domain::services::lookup_matcher::LookupMatcher;
use phishcheck::infrastructure::cache::DomainCache;
use phishcheck::infrastructure::feeds::ScamSnifferFeed;
use phishcheck::infrastructure::storage::create_storage_repository;
use phishcheck::presentation::routes;
use phishcheck::scheduler::{Scheduler, SchedulerOptions, TaskRegistry};
use phishcheck::workers::report_channel;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use phishcheck::utils::telemetry;

/// 等待上报队列排空的最长时间
const REPORT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "phishcheck")]
#[command(about = "Phishing site lookup service with scheduled cache refresh")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP lookup service and the task scheduler (default)
    Serve,
    /// Fetch the remote phishing domain list and upload it to object storage
    ImportPhishingSites,
}

/// 主函数
///
/// 应用程序入口点，解析命令行后启动服务或执行一次性导入
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    let cli = Cli::parse();

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded (environment: {})", settings.environment);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::ImportPhishingSites => import_phishing_sites(settings).await,
    }
}

async fn import_phishing_sites(settings: Settings) -> anyhow::Result<()> {
    info!("Importing phishing sites from {}", settings.sources.remote_url);

    let storage = create_storage_repository(&settings.storage).await?;
    let feed = ScamSnifferFeed::new(
        settings.sources.remote_url.clone(),
        settings.sources.fetch_timeout(),
    )?;
    let importer = ImportService::new(Arc::new(feed), storage, &settings.environment);

    let count = importer.import().await?;
    info!("Imported {} phishing sites", count);
    Ok(())
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    info!("Starting phishcheck...");

    // 3. Initialize Prometheus Metrics
    phishcheck::infrastructure::metrics::init_metrics(&settings.metrics);

    // 4. Initialize Storage
    let storage = create_storage_repository(&settings.storage).await?;

    // 5. Cache, matcher and report worker
    let cache = Arc::new(DomainCache::new());
    let mut matcher = LookupMatcher::new(cache.clone());
    let report_handle = if settings.report.enabled {
        let (queue, worker) = report_channel(&settings.report)?;
        matcher = matcher.with_reporter(Arc::new(queue));
        info!("Match reporting enabled, endpoint: {}", settings.report.endpoint);
        Some(worker.start())
    } else {
        None
    };
    let matcher = Arc::new(matcher);

    // 6. Register tasks and start the scheduler
    let refresher = Arc::new(CacheRefresher::new(
        cache,
        storage.clone(),
        settings.sources.fixed_domains.clone(),
        &settings.environment,
    ));
    let feed = ScamSnifferFeed::new(
        settings.sources.remote_url.clone(),
        settings.sources.fetch_timeout(),
    )?;
    let importer = Arc::new(ImportService::new(
        Arc::new(feed),
        storage,
        &settings.environment,
    ));

    let mut registry = TaskRegistry::new();
    register_business_tasks(&mut registry, refresher, Some(importer));

    let mut scheduler = Scheduler::new(
        registry,
        SchedulerOptions {
            once_delay: Duration::from_secs(settings.scheduler.once_delay_secs),
        },
    );
    let definitions: Vec<TaskDefinition> =
        settings.tasks.iter().map(TaskDefinition::from).collect();
    scheduler.load_from_config(&definitions)?;
    scheduler.start();

    // 7. Start HTTP server
    let app = routes::routes(matcher);
    let addr = settings.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.stop();
    if let Some(handle) = report_handle {
        if tokio::time::timeout(REPORT_DRAIN_TIMEOUT, handle).await.is_err() {
            warn!("Report worker did not finish within {:?}", REPORT_DRAIN_TIMEOUT);
        }
    }

    info!("phishcheck shut down");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }
}
