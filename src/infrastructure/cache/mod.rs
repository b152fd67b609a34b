// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 提供钓鱼域名的并发内存缓存
pub mod domain_cache;

pub use domain_cache::DomainCache;
