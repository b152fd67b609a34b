// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 对象不存在
    #[error("Object not found: {0}")]
    NotFound(String),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 对象存储仓库特质
///
/// 远端域名列表由导入命令上传，并由缓存刷新任务下载
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键上传数据，已存在时覆盖
    async fn upload(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键下载数据，对象不存在时返回 `StorageError::NotFound`
    async fn download(&self, key: &str) -> Result<Vec<u8>, StorageError>;
}
