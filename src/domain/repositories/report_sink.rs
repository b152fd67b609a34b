// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::report::{ReportHead, ReportItem};

/// 命中结果上报通道
///
/// 实现必须立即返回，不能阻塞调用方；发送结果对调用方不可见，
/// 失败只记录日志。
pub trait ReportSink: Send + Sync {
    fn send_async(&self, path: &str, head: ReportHead, items: Vec<ReportItem>);
}
