// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use hmac::{Hmac, Mac};
use metrics::{counter, histogram};
use reqwest::{header, Client};
use sha2::Sha256;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::settings::ReportSettings;
use crate::domain::models::report::{ReportEnvelope, ReportHead, ReportItem};
use crate::domain::repositories::report_sink::ReportSink;

type HmacSha256 = Hmac<Sha256>;

/// 上报发送错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("endpoint is not configured")]
    MissingEndpoint,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: status {0}")]
    Status(u16),

    #[error("failed to marshal data: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid signing key: {0}")]
    Signing(String),
}

/// 上报队列
///
/// `ReportSink` 的实现。入队不阻塞：队列满时丢弃并记录日志。
#[derive(Clone)]
pub struct ReportQueue {
    sender: mpsc::Sender<ReportEnvelope>,
}

impl ReportSink for ReportQueue {
    fn send_async(&self, path: &str, head: ReportHead, items: Vec<ReportItem>) {
        let envelope = ReportEnvelope {
            path: path.to_string(),
            head,
            items,
        };
        match self.sender.try_send(envelope) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                warn!(
                    "Report queue is full, dropping {} items for {}",
                    dropped.items.len(),
                    dropped.path
                );
                counter!("report_dropped_total", "reason" => "queue_full").increment(1);
            }
            Err(mpsc::error::TrySendError::Closed(dropped)) => {
                warn!("Report worker has stopped, dropping report for {}", dropped.path);
                counter!("report_dropped_total", "reason" => "closed").increment(1);
            }
        }
    }
}

/// 上报工作器
///
/// 逐条消费上报队列，将命中结果发送到上报平台
pub struct ReportWorker {
    receiver: mpsc::Receiver<ReportEnvelope>,
    client: Client,
    endpoint: String,
    secret: Option<String>,
}

/// 创建上报队列及其工作器
pub fn report_channel(
    settings: &ReportSettings,
) -> Result<(ReportQueue, ReportWorker), ReportError> {
    let (sender, receiver) = mpsc::channel(settings.queue_capacity.max(1));

    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(concat!("phishcheck-report/", env!("CARGO_PKG_VERSION"))),
    );
    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;

    let worker = ReportWorker {
        receiver,
        client,
        endpoint: settings.endpoint.clone(),
        secret: settings.secret.clone().filter(|s| !s.is_empty()),
    };
    Ok((ReportQueue { sender }, worker))
}

impl ReportWorker {
    /// 运行上报工作器，直到所有 `ReportQueue` 被释放
    pub async fn run(mut self) {
        info!("Report worker started");
        while let Some(envelope) = self.receiver.recv().await {
            if let Err(e) = self.deliver(&envelope).await {
                error!("Failed to send phishing sites report: {}", e);
            }
        }
        info!("Report worker stopped");
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn deliver(&self, envelope: &ReportEnvelope) -> Result<(), ReportError> {
        if self.endpoint.is_empty() {
            return Err(ReportError::MissingEndpoint);
        }

        let url = format!("{}{}", self.endpoint.trim_end_matches('/'), envelope.path);
        let body = serde_json::to_vec(&envelope.body())?;

        let mut request = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(secret) = &self.secret {
            request = request.header("X-Report-Signature", sign(secret, &body)?);
        }

        let start = Instant::now();
        let response = request.body(body).send().await;
        histogram!("report_delivery_duration_seconds").record(start.elapsed().as_secs_f64());

        let response = response.inspect_err(|_| {
            counter!("report_delivery_failed_total", "reason" => "network_error").increment(1);
        })?;

        if !response.status().is_success() {
            counter!("report_delivery_failed_total", "reason" => "http_error").increment(1);
            return Err(ReportError::Status(response.status().as_u16()));
        }

        counter!("report_delivery_success_total").increment(1);
        info!("Successfully sent {} report items to {}", envelope.items.len(), url);
        Ok(())
    }
}

/// 计算请求体的 HMAC-SHA256 签名（十六进制）
pub fn sign(secret: &str, body: &[u8]) -> Result<String, ReportError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ReportError::Signing(e.to_string()))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
