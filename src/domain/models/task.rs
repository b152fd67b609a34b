// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::settings::TaskSettings;

/// 一次性任务在配置中的调度标记
pub const ONCE_MARKER: &str = "@once";

/// 任务调度方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskSchedule {
    /// 启动宽限期后执行一次
    OneShot,
    /// 六字段 cron 表达式（首字段为秒）
    Cron(String),
    /// 已禁用，不参与调度
    Disabled,
}

impl fmt::Display for TaskSchedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskSchedule::OneShot => write!(f, "{}", ONCE_MARKER),
            TaskSchedule::Cron(expr) => write!(f, "{}", expr),
            TaskSchedule::Disabled => write!(f, "disabled"),
        }
    }
}

/// 任务定义
///
/// 由配置在调度器加载时创建，加载之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// 任务名称，仅用于日志
    pub name: String,
    pub enabled: bool,
    pub schedule: TaskSchedule,
    /// 任务注册表中的函数键
    pub function_key: String,
    pub description: String,
    /// 是否允许同一任务的多次触发并发执行
    ///
    /// 为 `false` 时，上一次执行尚未结束的触发会被跳过
    pub concurrent: bool,
}

impl TaskDefinition {
    /// 创建一个 cron 任务定义
    pub fn cron(name: &str, expression: &str, function_key: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            schedule: TaskSchedule::Cron(expression.to_string()),
            function_key: function_key.to_string(),
            description: String::new(),
            concurrent: true,
        }
    }

    /// 创建一个一次性任务定义
    pub fn once(name: &str, function_key: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            schedule: TaskSchedule::OneShot,
            function_key: function_key.to_string(),
            description: String::new(),
            concurrent: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self.schedule = TaskSchedule::Disabled;
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.concurrent = false;
        self
    }
}

impl From<&TaskSettings> for TaskDefinition {
    fn from(settings: &TaskSettings) -> Self {
        // `once` 字段仅作说明，实际调度方式由 cron 字段决定
        let schedule = if !settings.enable {
            TaskSchedule::Disabled
        } else if settings.cron.trim() == ONCE_MARKER {
            TaskSchedule::OneShot
        } else {
            TaskSchedule::Cron(settings.cron.trim().to_string())
        };

        Self {
            name: settings.name.clone(),
            enabled: settings.enable,
            schedule,
            function_key: settings.function.clone(),
            description: settings.description.clone(),
            concurrent: settings.concurrent,
        }
    }
}
