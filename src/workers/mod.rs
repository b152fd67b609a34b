// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台任务处理功能，目前包括命中结果上报
pub mod report_worker;

pub use report_worker::{report_channel, ReportQueue, ReportWorker};
