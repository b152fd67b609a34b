// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层依赖的外部协作方接口，具体实现由基础设施层提供。
///
/// 包含的接口：
/// - 远端数据源（domain_feed）：拉取钓鱼域名列表
/// - 上报通道（report_sink）：异步上报命中结果
/// - 存储仓库（storage_repository）：对象存储的上传与下载
pub mod domain_feed;
pub mod report_sink;
pub mod storage_repository;
