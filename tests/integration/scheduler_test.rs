// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishcheck::domain::models::task::TaskDefinition;
use phishcheck::scheduler::{Scheduler, SchedulerState, TaskRegistry};
use phishcheck::utils::errors::SchedulerError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::helpers::{fast_options, register_counting_task, TaskCounter};

const EVERY_SECOND: &str = "* * * * * *";

fn scheduler_with(key: &str, counter: Arc<TaskCounter>, work: Duration) -> Scheduler {
    let mut registry = TaskRegistry::new();
    register_counting_task(&mut registry, key, counter, work);
    Scheduler::new(registry, fast_options())
}

#[tokio::test]
async fn one_shot_fires_exactly_once_after_delay() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("boot", counter.clone(), Duration::ZERO);
    scheduler
        .load_from_config(&[TaskDefinition::once("OnceTestTask", "boot")])
        .unwrap();

    scheduler.start();
    scheduler.start();
    assert_eq!(scheduler.state(), SchedulerState::Running);
    assert_eq!(counter.runs(), 0);

    // 延迟为 100ms，60ms 时仍在等待窗口内
    sleep(Duration::from_millis(60)).await;
    assert_eq!(counter.runs(), 0);

    sleep(Duration::from_millis(340)).await;
    assert_eq!(counter.runs(), 1);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(counter.runs(), 1);
    scheduler.stop();
}

#[tokio::test]
async fn one_shot_does_not_fire_after_early_stop() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("boot", counter.clone(), Duration::ZERO);
    scheduler
        .load_from_config(&[TaskDefinition::once("OnceTestTask", "boot")])
        .unwrap();

    scheduler.start();
    sleep(Duration::from_millis(20)).await;
    scheduler.stop();

    sleep(Duration::from_millis(300)).await;
    assert_eq!(counter.runs(), 0);
    assert_eq!(scheduler.state(), SchedulerState::Stopped);
}

#[tokio::test]
async fn disabled_task_never_fires() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("work", counter.clone(), Duration::ZERO);
    let accepted = scheduler
        .load_from_config(&[
            TaskDefinition::cron("CronTestTask", EVERY_SECOND, "work").disabled(),
            TaskDefinition::once("OnceTestTask", "work").disabled(),
        ])
        .unwrap();
    assert_eq!(accepted, 0);

    scheduler.start();
    sleep(Duration::from_millis(1_500)).await;
    scheduler.stop();

    assert_eq!(counter.runs(), 0);
}

#[tokio::test]
async fn unknown_function_key_is_skipped_and_loading_continues() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("known", counter.clone(), Duration::ZERO);

    let accepted = scheduler
        .load_from_config(&[
            TaskDefinition::cron("Ghost", EVERY_SECOND, "not_registered"),
            TaskDefinition::once("Known", "known"),
        ])
        .unwrap();

    assert_eq!(accepted, 1);
    assert_eq!(scheduler.job_names(), vec!["Known"]);

    scheduler.start();
    sleep(Duration::from_millis(400)).await;
    scheduler.stop();
    assert_eq!(counter.runs(), 1);
}

#[tokio::test]
async fn malformed_cron_aborts_load_but_keeps_earlier_tasks() {
    let first = Arc::new(TaskCounter::default());
    let third = Arc::new(TaskCounter::default());
    let mut registry = TaskRegistry::new();
    register_counting_task(&mut registry, "first", first.clone(), Duration::ZERO);
    register_counting_task(&mut registry, "third", third.clone(), Duration::ZERO);
    let mut scheduler = Scheduler::new(registry, fast_options());

    let result = scheduler.load_from_config(&[
        TaskDefinition::cron("First", EVERY_SECOND, "first"),
        TaskDefinition::cron("Broken", "every minute please", "first"),
        TaskDefinition::cron("Third", EVERY_SECOND, "third"),
    ]);

    match result {
        Err(SchedulerError::InvalidCron { task, expression, .. }) => {
            assert_eq!(task, "Broken");
            assert_eq!(expression, "every minute please");
        }
        other => panic!("expected InvalidCron, got {:?}", other),
    }
    assert_eq!(scheduler.job_count(), 1);

    scheduler.start();
    sleep(Duration::from_millis(2_200)).await;
    scheduler.stop();

    assert!(first.runs() >= 1);
    assert_eq!(third.runs(), 0);
}

#[tokio::test]
async fn overlapping_firings_run_concurrently_by_default() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("slow", counter.clone(), Duration::from_millis(2_500));
    scheduler
        .load_from_config(&[TaskDefinition::cron("Slow", EVERY_SECOND, "slow")])
        .unwrap();

    scheduler.start();
    sleep(Duration::from_millis(3_300)).await;
    scheduler.stop();

    assert!(counter.runs() >= 2);
    assert!(counter.max_active() >= 2);
}

#[tokio::test]
async fn exclusive_task_skips_firings_while_running() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("slow", counter.clone(), Duration::from_millis(3_500));
    scheduler
        .load_from_config(&[TaskDefinition::cron("Slow", EVERY_SECOND, "slow").exclusive()])
        .unwrap();

    scheduler.start();
    sleep(Duration::from_millis(3_300)).await;
    scheduler.stop();

    assert_eq!(counter.runs(), 1);
    assert_eq!(counter.max_active(), 1);
}

#[tokio::test]
async fn stop_lets_in_flight_run_finish_and_prevents_new_firings() {
    let counter = Arc::new(TaskCounter::default());
    let mut scheduler = scheduler_with("work", counter.clone(), Duration::from_millis(600));
    scheduler
        .load_from_config(&[TaskDefinition::cron("Work", EVERY_SECOND, "work")])
        .unwrap();

    scheduler.start();
    while counter.runs() == 0 {
        sleep(Duration::from_millis(20)).await;
    }
    scheduler.stop();
    let runs_at_stop = counter.runs();

    sleep(Duration::from_millis(1_800)).await;
    assert_eq!(counter.runs(), runs_at_stop);
    assert_eq!(counter.active.load(std::sync::atomic::Ordering::SeqCst), 0);
}
