// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tracing::debug;

use crate::domain::models::phishing_site::{normalize_domain, www_variant, SiteCheckResult};
use crate::domain::models::report::{ReportHead, ReportItem, MATCH_REPORT_PATH};
use crate::domain::repositories::report_sink::ReportSink;
use crate::infrastructure::cache::domain_cache::DomainCache;

/// 钓鱼域名查询匹配器
///
/// 对每个查询依次尝试：
/// 1. 标准化后的精确匹配
/// 2. 切换 `www.` 前缀后的回退匹配
///
/// 均未命中的查询不产生输出。输出保持输入顺序，每个查询至多一条结果。
pub struct LookupMatcher {
    cache: Arc<DomainCache>,
    reporter: Option<Arc<dyn ReportSink>>,
}

impl LookupMatcher {
    pub fn new(cache: Arc<DomainCache>) -> Self {
        Self {
            cache,
            reporter: None,
        }
    }

    /// 设置命中上报通道
    pub fn with_reporter(mut self, reporter: Arc<dyn ReportSink>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// 批量检查查询域名
    ///
    /// # 参数
    ///
    /// * `queries` - 调用方提交的原始查询，顺序有意义
    ///
    /// # 返回值
    ///
    /// 仅包含命中查询的结果列表，长度不超过 `queries.len()`
    pub fn check(&self, queries: &[String]) -> Vec<SiteCheckResult> {
        let results: Vec<SiteCheckResult> = queries
            .iter()
            .filter_map(|query| self.match_query(query))
            .collect();

        counter!("phishing_lookup_queries_total").increment(queries.len() as u64);
        counter!("phishing_lookup_matches_total").increment(results.len() as u64);
        debug!(
            queries = queries.len(),
            matches = results.len(),
            "Checked phishing sites"
        );

        self.report(&results);
        results
    }

    /// 匹配单个查询
    pub fn match_query(&self, query: &str) -> Option<SiteCheckResult> {
        let normalized = normalize_domain(query);

        let entry = self
            .cache
            .load(&normalized)
            .or_else(|| self.cache.load(&www_variant(&normalized)))?;

        Some(SiteCheckResult {
            query: query.to_string(),
            domain: entry.domain,
            source: entry.source,
        })
    }

    fn report(&self, results: &[SiteCheckResult]) {
        let Some(reporter) = &self.reporter else {
            return;
        };
        if results.is_empty() {
            return;
        }

        let now_millis = Utc::now().timestamp_millis();
        let items = results
            .iter()
            .map(|result| ReportItem::from_match(result, now_millis))
            .collect();
        reporter.send_async(MATCH_REPORT_PATH, ReportHead::default(), items);
    }
}
