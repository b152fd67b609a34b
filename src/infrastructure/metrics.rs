// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 安装 Prometheus 导出器并注册指标说明
///
/// 未启用或监听地址无效时只记录日志，服务继续运行
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(
        "phishing_lookup_queries_total",
        "Number of domains submitted to the phishing site check"
    );
    describe_counter!(
        "phishing_lookup_matches_total",
        "Number of submitted domains that matched a cached phishing site"
    );
    describe_counter!("cache_refresh_total", "Cache refresh runs by status");
    describe_gauge!("cache_entries", "Number of domains held in the phishing site cache");
    describe_counter!(
        "scheduled_task_runs_total",
        "Scheduled task executions by task and status"
    );
    describe_histogram!(
        "scheduled_task_duration_seconds",
        Unit::Seconds,
        "Scheduled task execution time"
    );
    describe_counter!("report_dropped_total", "Match reports dropped before delivery");
    describe_counter!("report_delivery_success_total", "Match reports delivered");
    describe_counter!("report_delivery_failed_total", "Match report deliveries that failed");
    describe_histogram!(
        "report_delivery_duration_seconds",
        Unit::Seconds,
        "Match report delivery time"
    );
}
