// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;

use crate::domain::models::phishing_site::PhishingSite;

/// 钓鱼域名内存缓存
///
/// 以标准化域名为键。底层为分片加锁的 `DashMap`：
/// - 写入只锁定键所在的分片，不同分片上的读取不会被阻塞
/// - 同一键的读取要么看到旧值，要么看到新值，不会出现部分写入
///
/// 写入方为刷新任务，读取方为并发的查询请求，调用方不需要额外加锁。
/// 缓存没有淘汰、过期和容量限制，刷新只会新增或覆盖条目。
#[derive(Debug, Default)]
pub struct DomainCache {
    entries: DashMap<String, PhishingSite>,
}

impl DomainCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// 无条件写入（存在则覆盖）
    pub fn store(&self, key: impl Into<String>, entry: PhishingSite) {
        self.entries.insert(key.into(), entry);
    }

    /// 按键读取条目的副本
    pub fn load(&self, key: &str) -> Option<PhishingSite> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
