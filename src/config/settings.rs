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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、存储、数据源、调度任务、上报和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 部署环境，同时作为对象存储键的前缀
    pub environment: String,
    /// 服务器配置
    pub server: ServerSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 钓鱼域名数据源配置
    pub sources: SourceSettings,
    /// 调度器配置
    pub scheduler: SchedulerSettings,
    /// 定时任务列表
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskSettings>,
    /// 命中上报配置
    pub report: ReportSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (local, s3, memory)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
    /// S3 区域
    pub s3_region: Option<String>,
    /// S3 存储桶名称
    pub s3_bucket: Option<String>,
    /// S3 访问密钥
    pub s3_access_key: Option<String>,
    /// S3 密钥
    pub s3_secret_key: Option<String>,
    /// S3 端点 (可选，用于 MinIO 等兼容服务)
    pub s3_endpoint: Option<String>,
}

/// 钓鱼域名数据源配置
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// 固定的钓鱼域名列表
    #[serde(default)]
    pub fixed_domains: Vec<String>,
    /// 远程域名列表地址
    pub remote_url: String,
    /// 拉取超时时间（秒）
    pub fetch_timeout_secs: u64,
}

impl SourceSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// 调度器配置
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// 一次性任务的启动宽限期（秒）
    pub once_delay_secs: u64,
}

/// 单个定时任务配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskSettings {
    pub name: String,
    pub enable: bool,
    /// 仅作说明，调度方式由 `cron` 决定
    #[serde(default)]
    pub once: bool,
    /// 六字段 cron 表达式，或 `@once`
    pub cron: String,
    /// 任务注册表中的函数键
    pub function: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub concurrent: bool,
}

/// 命中上报配置
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub enabled: bool,
    /// 上报平台地址，请求路径追加在其后
    pub endpoint: String,
    /// HMAC 签名密钥，为空时不签名
    pub secret: Option<String>,
    /// 上报队列容量，队列满时丢弃
    pub queue_capacity: usize,
    /// 单次上报超时时间（秒）
    pub timeout_secs: u64,
}

/// 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub listen_addr: String,
}

fn default_true() -> bool {
    true
}

fn default_tasks() -> Vec<TaskSettings> {
    vec![TaskSettings {
        name: "LoadPhishingSites2CacheTask".to_string(),
        enable: true,
        once: false,
        cron: "0 */10 * * * *".to_string(),
        function: "load_phishing_sites_to_cache".to_string(),
        description: "Refresh the phishing site cache".to_string(),
        concurrent: false,
    }]
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和 `PHISHCHECK__*` 环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("PHISHCHECK")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("sources.fixed_domains")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 从 YAML 文本加载配置，未给出的字段使用默认值
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", "local")?
            // Default server settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Default Storage settings
            .set_default("storage.storage_type", "local")?
            .set_default("storage.local_path", "./storage")?
            // Default source settings
            .set_default("sources.fixed_domains", Vec::<String>::new())?
            .set_default(
                "sources.remote_url",
                "https://raw.githubusercontent.com/scamsniffer/scam-database/main/blacklist/domains.json",
            )?
            .set_default("sources.fetch_timeout_secs", 30)?
            .set_default("scheduler.once_delay_secs", 5)?
            // Default report settings
            .set_default("report.enabled", false)?
            .set_default("report.endpoint", "")?
            .set_default("report.queue_capacity", 1024)?
            .set_default("report.timeout_secs", 10)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 服务监听地址
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
