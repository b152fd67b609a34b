// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：缓存条目、查询结果、任务定义和上报结构
/// - 仓库接口（repositories）：对象存储、远端数据源和上报通道的抽象
/// - 服务（services）：缓存刷新、导入和查询匹配
///
/// 领域层不依赖于任何具体的外部实现。
pub mod models;
pub mod repositories;
pub mod services;
