// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;
use tracing::info;

use crate::domain::repositories::domain_feed::{DomainFeed, FeedError};
use crate::utils::retry_policy::RetryPolicy;

/// ScamSniffer 钓鱼域名数据源
///
/// 数据源返回一个 JSON 字符串数组。非 200 状态码和无法解析的响应体都视为拉取失败。
pub struct ScamSnifferFeed {
    client: Client,
    url: String,
    retry_policy: RetryPolicy,
}

impl ScamSnifferFeed {
    /// 创建新的数据源客户端
    ///
    /// # 参数
    ///
    /// * `url` - 域名列表地址
    /// * `timeout` - 单次请求超时
    pub fn new(url: String, timeout: Duration) -> Result<Self, FeedError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("phishcheck/", env!("CARGO_PKG_VERSION"))),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url,
            retry_policy: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    async fn fetch_once(&self) -> Result<Vec<String>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Request {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await.map_err(|e| FeedError::Request {
            url: self.url.clone(),
            message: e.to_string(),
        })?;
        info!("Successfully fetched data, response size: {} bytes", body.len());

        let domains: Vec<String> =
            serde_json::from_slice(&body).map_err(|e| FeedError::Decode(e.to_string()))?;
        info!("Parsed {} domains from JSON", domains.len());
        Ok(domains)
    }
}

#[async_trait]
impl DomainFeed for ScamSnifferFeed {
    async fn fetch_domains(&self) -> Result<Vec<String>, FeedError> {
        self.retry_policy
            .run(move || self.fetch_once(), FeedError::is_retryable)
            .await
    }
}
