// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_stream::Stream;
use rill_stream_time::{ExecuteInExt, ObserveInExt, Scheduler};
use rill_test_utils::Recorder;
use tokio::task::yield_now;

#[tokio::test(start_paused = true)]
async fn test_observe_in_defers_delivery_to_the_scheduler() -> anyhow::Result<()> {
    // Arrange
    let scheduler = Scheduler::current();
    let source = Stream::sequence([1, 2, 3]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.observe_in(&scheduler));

    // Assert: delivery is asynchronous, so nothing has arrived yet.
    assert!(recorder.events().is_empty());
    yield_now().await;
    assert_eq!(recorder.values(), vec![1, 2, 3]);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_execute_in_subscribes_from_the_scheduler() -> anyhow::Result<()> {
    // Arrange
    let scheduler = Scheduler::current();
    let source = Stream::sequence([1, 2]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.execute_in(&scheduler));

    // Assert: the producer has not run on the observing call site.
    assert!(recorder.events().is_empty());
    yield_now().await;
    assert_eq!(recorder.values(), vec![1, 2]);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_execute_in_disposal_before_task_runs_is_safe() -> anyhow::Result<()> {
    // Arrange
    let scheduler = Scheduler::current();
    let source = Stream::sequence([1, 2]);
    let recorder = Recorder::new();

    // Act
    let subscription = recorder.subscribe(&source.execute_in(&scheduler));
    subscription.dispose();
    yield_now().await;

    // Assert
    assert!(recorder.events().is_empty());
    Ok(())
}
