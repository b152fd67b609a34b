// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 把领域服务包装成可调度的任务，并以稳定的键注册到任务注册表
pub mod tasks;
