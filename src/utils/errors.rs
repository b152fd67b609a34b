// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 调度器错误类型
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("任务 '{task}' 的 cron 表达式无效 '{expression}': {reason}")]
    InvalidCron {
        task: String,
        expression: String,
        reason: String,
    },

    #[error("调度器状态错误: 当前状态 {0} 不允许加载任务")]
    InvalidState(String),
}

/// 任务执行错误类型
///
/// 注册到调度器的任务函数统一返回该错误
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("缓存刷新失败: {0}")]
    Refresh(String),

    #[error("导入失败: {0}")]
    Import(String),
}
