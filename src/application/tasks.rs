// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;

use crate::domain::services::cache_refresher::CacheRefresher;
use crate::domain::services::import_service::ImportService;
use crate::scheduler::registry::TaskRegistry;
use crate::utils::errors::TaskError;

/// 刷新钓鱼域名缓存的任务键
pub const LOAD_PHISHING_SITES_TASK: &str = "load_phishing_sites_to_cache";
/// 拉取远端域名并上传到对象存储的任务键
pub const IMPORT_PHISHING_SITES_TASK: &str = "import_phishing_sites";

/// 注册业务任务
///
/// # 参数
///
/// * `registry` - 任务注册表
/// * `refresher` - 缓存刷新服务
/// * `importer` - 导入服务，未提供时不注册导入任务
pub fn register_business_tasks(
    registry: &mut TaskRegistry,
    refresher: Arc<CacheRefresher>,
    importer: Option<Arc<ImportService>>,
) {
    registry.register(LOAD_PHISHING_SITES_TASK, move || {
        let refresher = refresher.clone();
        async move {
            let report = refresher.refresh().await?;
            info!(
                fixed = report.fixed,
                remote = report.remote,
                "Phishing site cache refreshed"
            );
            Ok::<(), TaskError>(())
        }
    });

    if let Some(importer) = importer {
        registry.register(IMPORT_PHISHING_SITES_TASK, move || {
            let importer = importer.clone();
            async move {
                importer.import().await?;
                Ok::<(), TaskError>(())
            }
        });
    }
}
