// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 远端数据源错误类型
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to fetch data from {url}: {message}")]
    Request { url: String, message: String },

    #[error("HTTP request failed with status: {0}")]
    Status(u16),

    #[error("failed to parse JSON: {0}")]
    Decode(String),
}

impl FeedError {
    /// 网络错误和服务端错误可以重试，客户端错误和解析错误不重试
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Request { .. } => true,
            FeedError::Status(code) => *code >= 500 || *code == 429,
            FeedError::Decode(_) => false,
        }
    }
}

/// 远端钓鱼域名数据源
#[async_trait]
pub trait DomainFeed: Send + Sync {
    /// 拉取完整的域名列表
    async fn fetch_domains(&self) -> Result<Vec<String>, FeedError>;
}
