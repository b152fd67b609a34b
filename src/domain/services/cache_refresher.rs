// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, gauge};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::models::phishing_site::{remote_object_key, PhishingSite, SiteSource};
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::infrastructure::cache::domain_cache::DomainCache;
use crate::utils::errors::TaskError;

/// 缓存刷新错误类型
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Download phishing sites failed: {0}")]
    Download(#[from] StorageError),

    #[error("Decode phishing sites failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<RefreshError> for TaskError {
    fn from(err: RefreshError) -> Self {
        TaskError::Refresh(err.to_string())
    }
}

/// 单次刷新的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub fixed: usize,
    pub remote: usize,
}

/// 缓存刷新服务
///
/// 一次刷新分两个阶段：先写入固定配置的域名，再写入对象存储中的远端域名。
/// 远端阶段失败时整个刷新返回错误，已写入的固定条目保留。
/// 两个阶段都对域名做标准化，空白域名被跳过。
/// 固定域名列表在创建时确定，进程运行期间不再变化。
pub struct CacheRefresher {
    cache: Arc<DomainCache>,
    storage: Arc<dyn StorageRepository>,
    fixed_domains: Vec<String>,
    object_key: String,
}

impl CacheRefresher {
    /// 创建新的缓存刷新服务
    ///
    /// # 参数
    ///
    /// * `cache` - 要维护的域名缓存
    /// * `storage` - 远端域名列表所在的对象存储
    /// * `fixed_domains` - 静态配置的域名列表
    /// * `environment` - 部署环境，决定对象存储键的前缀
    pub fn new(
        cache: Arc<DomainCache>,
        storage: Arc<dyn StorageRepository>,
        fixed_domains: Vec<String>,
        environment: &str,
    ) -> Self {
        Self {
            cache,
            storage,
            fixed_domains,
            object_key: remote_object_key(environment),
        }
    }

    /// 执行一次完整刷新
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        info!("Loading phishing sites into cache");

        let fixed = self.load_fixed();
        info!("Successfully loaded {} fixed phishing sites from config to cache", fixed);

        let remote = match self.load_remote().await {
            Ok(count) => count,
            Err(e) => {
                error!("Download phishing sites failed: {}", e);
                counter!("cache_refresh_total", "status" => "failed").increment(1);
                gauge!("cache_entries").set(self.cache.len() as f64);
                return Err(e);
            }
        };
        info!("Successfully loaded {} phishing sites from storage to cache", remote);

        counter!("cache_refresh_total", "status" => "success").increment(1);
        gauge!("cache_entries").set(self.cache.len() as f64);
        info!(
            "Total loaded {} phishing sites to cache (fixed-config: {}, storage: {})",
            fixed + remote,
            fixed,
            remote
        );

        Ok(RefreshReport { fixed, remote })
    }

    fn load_fixed(&self) -> usize {
        self.store_all(&self.fixed_domains, SiteSource::Fixed)
    }

    async fn load_remote(&self) -> Result<usize, RefreshError> {
        let data = self.storage.download(&self.object_key).await?;
        let domains: Vec<String> = serde_json::from_slice(&data)?;
        Ok(self.store_all(&domains, SiteSource::Remote))
    }

    fn store_all(&self, domains: &[String], source: SiteSource) -> usize {
        let mut stored = 0;
        for site in domains.iter().filter_map(|raw| PhishingSite::new(raw, source)) {
            self.cache.store(site.domain.clone(), site);
            stored += 1;
        }
        stored
    }
}
