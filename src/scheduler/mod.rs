// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 调度模块
///
/// 任务注册表以及基于 cron 和一次性延迟的任务调度器
pub mod registry;
pub mod scheduler;

pub use registry::{TaskFn, TaskRegistry};
pub use scheduler::{Scheduler, SchedulerOptions, SchedulerState};
