// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 钓鱼网站（phishing_site）：缓存条目、查询结果以及域名标准化规则
/// - 上报（report）：命中结果上报的数据结构
/// - 任务（task）：调度器加载的任务定义
pub mod phishing_site;
pub mod report;
pub mod task;
