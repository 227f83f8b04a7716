// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use rill_stream::PushStream;
use rill_stream_time::ThrottleExt;
use rill_test_utils::Recorder;
use tokio::time::advance;

#[tokio::test(start_paused = true)]
async fn test_throttle_passes_leading_edge_and_drops_the_rest() -> anyhow::Result<()> {
    // Arrange
    let source = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&source.stream().throttle(Duration::from_millis(100)));

    // Act
    source.next(1);
    advance(Duration::from_millis(30)).await;
    source.next(2);
    advance(Duration::from_millis(30)).await;
    source.next(3);
    advance(Duration::from_millis(40)).await;
    source.next(4);

    // Assert: 1 opens an interval; 2 and 3 fall inside it; 4 starts the next.
    assert_eq!(recorder.values(), vec![1, 4]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_throttle_forwards_completion_immediately() -> anyhow::Result<()> {
    // Arrange
    let source = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&source.stream().throttle(Duration::from_millis(100)));

    // Act
    source.next(1);
    source.completed();

    // Assert
    assert_eq!(recorder.values(), vec![1]);
    assert!(recorder.is_completed());
    Ok(())
}
