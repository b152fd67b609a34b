// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，提供对具体技术的抽象和封装。
///
/// 包含的子模块：
/// - 缓存（cache）：钓鱼域名的并发内存缓存
/// - 数据源（feeds）：远程钓鱼域名列表客户端
/// - 指标（metrics）：Prometheus 指标导出
/// - 存储（storage）：本地、S3 和内存对象存储
///
/// 基础设施层依赖于领域层的抽象接口（StorageRepository、DomainFeed）。
pub mod cache;
pub mod feeds;
pub mod metrics;
pub mod storage;
