// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::models::phishing_site::remote_object_key;
use crate::domain::repositories::domain_feed::{DomainFeed, FeedError};
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use crate::utils::errors::TaskError;

/// 导入错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("fetch scamsniffer failed: {0}")]
    Fetch(#[from] FeedError),

    #[error("marshal scamsniffer failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("upload scam-sniffer failed: {0}")]
    Upload(#[from] StorageError),
}

impl From<ImportError> for TaskError {
    fn from(err: ImportError) -> Self {
        TaskError::Import(err.to_string())
    }
}

/// 钓鱼域名导入服务
///
/// 从远端数据源拉取域名列表，序列化为 JSON 数组后上传到对象存储，
/// 缓存刷新任务会从同一个键读取。
pub struct ImportService {
    feed: Arc<dyn DomainFeed>,
    storage: Arc<dyn StorageRepository>,
    object_key: String,
}

impl ImportService {
    pub fn new(
        feed: Arc<dyn DomainFeed>,
        storage: Arc<dyn StorageRepository>,
        environment: &str,
    ) -> Self {
        Self {
            feed,
            storage,
            object_key: remote_object_key(environment),
        }
    }

    /// 执行一次导入，返回上传的域名数量
    pub async fn import(&self) -> Result<usize, ImportError> {
        let domains = self.feed.fetch_domains().await.inspect_err(|e| {
            error!("fetch scamsniffer failed: {}", e);
        })?;

        let payload = serde_json::to_vec(&domains)?;
        self.storage
            .upload(&self.object_key, &payload)
            .await
            .inspect_err(|e| error!("upload scam-sniffer failed: {}", e))?;

        info!(
            "Successfully uploaded {} scamsniffer domains to {}",
            domains.len(),
            self.object_key
        );
        Ok(domains.len())
    }
}
