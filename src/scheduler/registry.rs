// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::{BoxFuture, FutureExt};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::utils::errors::TaskError;

/// 可调度的任务函数：无参数，返回异步结果
pub type TaskFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), TaskError>> + Send + Sync>;

/// 任务注册表
///
/// 以调用方给定的字符串键索引任务函数。重复注册同一个键时后者覆盖前者。
/// 注册应在调度器启动前完成，之后只读。
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskFn>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册任务函数
    ///
    /// # 参数
    ///
    /// * `key` - 任务配置中 `function` 字段引用的键
    /// * `task` - 每次触发时调用的异步函数
    pub fn register<F, Fut>(&mut self, key: impl Into<String>, task: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        let key = key.into();
        let task: TaskFn = Arc::new(move || task().boxed());
        if self.tasks.insert(key.clone(), task).is_some() {
            debug!("Replaced registered task: {}", key);
        } else {
            debug!("Registered task: {}", key);
        }
    }

    /// 按键查找任务函数
    pub fn lookup(&self, key: &str) -> Option<TaskFn> {
        self.tasks.get(key).cloned()
    }

    /// 所有已注册的键（有序，便于日志输出）
    pub fn names(&self) -> BTreeSet<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
