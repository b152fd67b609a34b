// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use cron::Schedule;
use metrics::{counter, histogram};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::models::task::{TaskDefinition, TaskSchedule};
use crate::scheduler::registry::{TaskFn, TaskRegistry};
use crate::utils::errors::SchedulerError;

/// cron 表达式的字段数（秒 分 时 日 月 周）
const CRON_FIELDS: usize = 6;

/// 周字段 0-6 对应的名称
const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// 调度器生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Created,
    Loaded,
    Running,
    Stopped,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SchedulerState::Created => "created",
            SchedulerState::Loaded => "loaded",
            SchedulerState::Running => "running",
            SchedulerState::Stopped => "stopped",
        };
        write!(f, "{}", name)
    }
}

/// 调度器选项
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// 一次性任务在 `start()` 之后的延迟
    pub once_delay: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            once_delay: Duration::from_secs(5),
        }
    }
}

enum Trigger {
    Cron(Box<Schedule>),
    Once,
}

struct Job {
    name: String,
    function_key: String,
    trigger: Trigger,
    task: TaskFn,
    concurrent: bool,
    running: Arc<AtomicBool>,
}

/// 执行结束（包括 panic）时清除运行标记
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 任务调度器
///
/// 根据任务定义把注册表中的函数挂到 cron 表达式或一次性延迟上。
/// 每次触发都在独立的 tokio 任务中执行，任务失败只记录日志，不影响后续触发。
pub struct Scheduler {
    registry: TaskRegistry,
    options: SchedulerOptions,
    state: SchedulerState,
    jobs: Vec<Arc<Job>>,
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// 创建新的调度器实例
    ///
    /// # 参数
    ///
    /// * `registry` - 已注册完毕的任务注册表，之后只读
    /// * `options` - 调度选项
    pub fn new(registry: TaskRegistry, options: SchedulerOptions) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            registry,
            options,
            state: SchedulerState::Created,
            jobs: Vec::new(),
            shutdown,
            handles: Vec::new(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// 已接受的任务数量
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn job_names(&self) -> Vec<String> {
        self.jobs.iter().map(|job| job.name.clone()).collect()
    }

    /// 从任务定义加载任务
    ///
    /// 禁用的任务和函数键未注册的任务会被跳过，加载继续。
    /// cron 表达式无效时立即返回错误，之前已接受的任务保留，之后的任务不再处理。
    ///
    /// # 参数
    ///
    /// * `definitions` - 任务定义列表
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 本次接受的任务数量
    /// * `Err(SchedulerError)` - cron 表达式无效或当前状态不允许加载
    pub fn load_from_config(
        &mut self,
        definitions: &[TaskDefinition],
    ) -> Result<usize, SchedulerError> {
        if !matches!(self.state, SchedulerState::Created | SchedulerState::Loaded) {
            return Err(SchedulerError::InvalidState(self.state.to_string()));
        }
        self.state = SchedulerState::Loaded;

        let mut accepted = 0;
        for definition in definitions {
            if !definition.enabled || definition.schedule == TaskSchedule::Disabled {
                debug!("Task {} is disabled, skipping", definition.name);
                continue;
            }

            let Some(task) = self.registry.lookup(&definition.function_key) else {
                error!(
                    "Task {} references unknown function '{}', available: {:?}",
                    definition.name,
                    definition.function_key,
                    self.registry.names()
                );
                continue;
            };

            let trigger = match &definition.schedule {
                TaskSchedule::OneShot => Trigger::Once,
                TaskSchedule::Cron(expression) => {
                    Trigger::Cron(Box::new(parse_cron(&definition.name, expression)?))
                }
                TaskSchedule::Disabled => continue,
            };

            info!(
                "Loaded task {} ({}) with schedule {}",
                definition.name, definition.function_key, definition.schedule
            );
            self.jobs.push(Arc::new(Job {
                name: definition.name.clone(),
                function_key: definition.function_key.clone(),
                trigger,
                task,
                concurrent: definition.concurrent,
                running: Arc::new(AtomicBool::new(false)),
            }));
            accepted += 1;
        }

        Ok(accepted)
    }

    /// 启动调度
    ///
    /// 为每个任务创建后台循环后立即返回。重复启动只记录日志。
    pub fn start(&mut self) {
        match self.state {
            SchedulerState::Running => {
                warn!("Scheduler is already running");
                return;
            }
            SchedulerState::Stopped => {
                warn!("Scheduler has been stopped and cannot be restarted");
                return;
            }
            SchedulerState::Created | SchedulerState::Loaded => {}
        }

        for job in &self.jobs {
            let shutdown = self.shutdown.subscribe();
            let handle = match &job.trigger {
                Trigger::Cron(schedule) => tokio::spawn(run_cron(
                    job.clone(),
                    schedule.as_ref().clone(),
                    shutdown,
                )),
                Trigger::Once => {
                    tokio::spawn(run_once(job.clone(), self.options.once_delay, shutdown))
                }
            };
            self.handles.push(handle);
        }

        self.state = SchedulerState::Running;
        info!("Scheduler started with {} tasks", self.jobs.len());
    }

    /// 停止调度
    ///
    /// 之后不再有新的触发，正在执行的任务会运行结束。
    pub fn stop(&mut self) {
        if self.state == SchedulerState::Stopped {
            debug!("Scheduler is already stopped");
            return;
        }

        self.shutdown.send_replace(true);
        self.state = SchedulerState::Stopped;
        self.handles.clear();
        info!("Scheduler stopped");
    }
}

/// 解析六字段 cron 表达式（首字段为秒），`@` 开头的宏除外
///
/// 周字段按 0-6 编号，0 为周日
pub fn parse_cron(task: &str, expression: &str) -> Result<Schedule, SchedulerError> {
    let expression = expression.trim();
    let invalid = |reason: String| SchedulerError::InvalidCron {
        task: task.to_string(),
        expression: expression.to_string(),
        reason,
    };

    if expression.starts_with('@') {
        return Schedule::from_str(expression).map_err(|e| invalid(e.to_string()));
    }

    let mut fields: Vec<String> = expression.split_whitespace().map(str::to_string).collect();
    if fields.len() != CRON_FIELDS {
        return Err(invalid(format!(
            "expected {} fields, found {}",
            CRON_FIELDS,
            fields.len()
        )));
    }

    fields[CRON_FIELDS - 1] = day_of_week_names(&fields[CRON_FIELDS - 1]).map_err(invalid)?;
    Schedule::from_str(&fields.join(" ")).map_err(|e| invalid(e.to_string()))
}

/// 把周字段中的数字改写为英文缩写
///
/// `cron` 库的周字段从 1（周日）开始编号，改写为名称后与 0-6 的编号习惯无关
fn day_of_week_names(field: &str) -> Result<String, String> {
    let mut items = Vec::new();
    for item in field.split(',') {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };

        let mut bounds = Vec::new();
        for bound in range.split('-') {
            bounds.push(weekday_name(bound)?);
        }
        // 单点加步长表示从该点到周六
        if step.is_some() && bounds.len() == 1 && !matches!(bounds[0].as_str(), "*" | "?") {
            bounds.push(WEEKDAY_NAMES[WEEKDAY_NAMES.len() - 1].to_string());
        }
        let range = bounds.join("-");

        items.push(match step {
            Some(step) => format!("{}/{}", range, step),
            None => range,
        });
    }
    Ok(items.join(","))
}

fn weekday_name(token: &str) -> Result<String, String> {
    match token.parse::<usize>() {
        Ok(day) => WEEKDAY_NAMES
            .get(day)
            .map(|name| name.to_string())
            .ok_or_else(|| format!("day of week {} is out of range 0-6", day)),
        Err(_) => Ok(token.to_string()),
    }
}

async fn run_cron(job: Arc<Job>, schedule: Schedule, mut shutdown: watch::Receiver<bool>) {
    let mut cursor: DateTime<Utc> = Utc::now();
    loop {
        if *shutdown.borrow() {
            break;
        }

        let Some(next) = schedule.after(&cursor).next() else {
            info!("Task {} has no upcoming fire time", job.name);
            break;
        };
        let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);

        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                dispatch(&job);
                cursor = next.max(Utc::now());
            }
            _ = shutdown.changed() => break,
        }
    }
    debug!("Dispatch loop for task {} exited", job.name);
}

async fn run_once(job: Arc<Job>, delay: Duration, mut shutdown: watch::Receiver<bool>) {
    if *shutdown.borrow() {
        return;
    }

    tokio::select! {
        _ = tokio::time::sleep(delay) => execute(job).await,
        _ = shutdown.changed() => {
            debug!("One-shot task {} cancelled before firing", job.name);
        }
    }
}

fn dispatch(job: &Arc<Job>) {
    if !job.concurrent && job.running.swap(true, Ordering::SeqCst) {
        warn!("Task {} is still running, skipping this firing", job.name);
        counter!("scheduled_task_runs_total", "task" => job.name.clone(), "status" => "skipped")
            .increment(1);
        return;
    }

    tokio::spawn(execute(job.clone()));
}

async fn execute(job: Arc<Job>) {
    let _guard = (!job.concurrent).then(|| RunningGuard(job.running.clone()));

    debug!("Running task {} ({})", job.name, job.function_key);
    let start = Instant::now();
    let result = (job.task)().await;
    let elapsed = start.elapsed();
    histogram!("scheduled_task_duration_seconds", "task" => job.name.clone())
        .record(elapsed.as_secs_f64());

    match result {
        Ok(()) => {
            info!("Task {} finished in {:?}", job.name, elapsed);
            counter!("scheduled_task_runs_total", "task" => job.name.clone(), "status" => "success")
                .increment(1);
        }
        Err(e) => {
            error!("Task {} failed: {}", job.name, e);
            counter!("scheduled_task_runs_total", "task" => job.name.clone(), "status" => "failed")
                .increment(1);
        }
    }
}
