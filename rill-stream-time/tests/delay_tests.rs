// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use rill_stream::PushStream;
use rill_stream_time::{DelayExt, Scheduler};
use rill_test_utils::Recorder;
use tokio::task::yield_now;
use tokio::time::advance;

#[tokio::test(start_paused = true)]
async fn test_delay_shifts_every_event_by_the_delay() -> anyhow::Result<()> {
    // Arrange
    let scheduler = Scheduler::current();
    let source = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&source.stream().delay(Duration::from_millis(100), &scheduler));
    yield_now().await;

    // Act
    source.next(1);
    source.next(2);
    advance(Duration::from_millis(99)).await;
    yield_now().await;
    assert!(recorder.values().is_empty());
    advance(Duration::from_millis(1)).await;
    yield_now().await;

    // Assert
    assert_eq!(recorder.values(), vec![1, 2]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delay_shifts_completion_too() -> anyhow::Result<()> {
    // Arrange
    let scheduler = Scheduler::current();
    let source = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&source.stream().delay(Duration::from_millis(100), &scheduler));
    yield_now().await;

    // Act
    source.next(1);
    source.completed();
    advance(Duration::from_millis(50)).await;
    yield_now().await;
    assert!(!recorder.is_completed());
    advance(Duration::from_millis(50)).await;
    yield_now().await;

    // Assert
    assert_eq!(recorder.values(), vec![1]);
    assert!(recorder.is_completed());
    Ok(())
}
