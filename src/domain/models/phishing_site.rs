// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 远端数据源名称，同时用于对象存储中的文件名
pub const SCAM_SNIFFER_SOURCE: &str = "scam-sniffer";

/// 固定配置数据源名称
pub const FIXED_SNIFFER_SOURCE: &str = "fixed-sniffer";

const WWW_PREFIX: &str = "www.";

/// 域名来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteSource {
    /// 来自静态配置
    #[serde(rename = "fixed-sniffer")]
    Fixed,
    /// 来自远端数据源
    #[serde(rename = "scam-sniffer")]
    Remote,
}

impl SiteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteSource::Fixed => FIXED_SNIFFER_SOURCE,
            SiteSource::Remote => SCAM_SNIFFER_SOURCE,
        }
    }
}

impl fmt::Display for SiteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 钓鱼网站缓存条目
///
/// `domain` 始终是标准化后的域名，并且与其在缓存中的键一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhishingSite {
    pub domain: String,
    pub source: SiteSource,
}

impl PhishingSite {
    /// 由原始域名创建条目，域名为空白时返回 `None`
    pub fn new(raw_domain: &str, source: SiteSource) -> Option<Self> {
        let domain = normalize_domain(raw_domain);
        if domain.is_empty() {
            return None;
        }
        Some(Self { domain, source })
    }
}

/// 单条查询的匹配结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCheckResult {
    /// 调用方提交的原始查询字符串
    pub query: String,
    /// 命中的缓存键
    pub domain: String,
    pub source: SiteSource,
}

/// 标准化域名：去除首尾空白并转为小写
pub fn normalize_domain(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 计算 www 回退匹配时使用的候选键
///
/// 不带 `www.` 前缀时补上前缀，带前缀时去掉前缀
pub fn www_variant(normalized: &str) -> String {
    match normalized.strip_prefix(WWW_PREFIX) {
        Some(stripped) => stripped.to_string(),
        None => format!("{}{}", WWW_PREFIX, normalized),
    }
}

/// 远端域名列表在对象存储中的键
///
/// 键以部署环境作为前缀，导入和刷新两端使用同一约定
pub fn remote_object_key(environment: &str) -> String {
    format!("{}/{}-domains.json", environment, SCAM_SNIFFER_SOURCE)
}
