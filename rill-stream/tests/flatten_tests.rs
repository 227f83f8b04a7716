// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_stream::{FlattenStrategy, PushStream, Stream};
use rill_test_utils::{collect_values, Recorder};

#[test]
fn test_merge_interleaves_inner_streams() -> anyhow::Result<()> {
    // Arrange
    let outer = PushStream::new();
    let first = PushStream::new();
    let second = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&outer.stream().merge());

    // Act
    outer.next(first.stream());
    first.next(1);
    outer.next(second.stream());
    second.next(10);
    first.next(2);
    outer.completed();
    first.completed();
    second.next(20);
    second.completed();

    // Assert: completion waits for the outer stream and every inner one.
    assert_eq!(recorder.values(), vec![1, 10, 2, 20]);
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_concat_queues_inner_streams_until_predecessor_completes() -> anyhow::Result<()> {
    // Arrange
    let outer = PushStream::new();
    let first = PushStream::new();
    let second = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&outer.stream().concat());

    // Act: the second inner stream is hot, so elements pushed while it is
    // still queued are missed.
    outer.next(first.stream());
    outer.next(second.stream());
    second.next(99);
    first.next(1);
    first.completed();
    second.next(2);
    outer.completed();
    second.completed();

    // Assert
    assert_eq!(recorder.values(), vec![1, 2]);
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_concat_of_cold_streams_is_sequential() -> anyhow::Result<()> {
    // Arrange: every inner stream completes synchronously on subscription.
    let outer = Stream::sequence([
        Stream::sequence([1, 2]),
        Stream::sequence([3]),
        Stream::sequence([4, 5]),
    ]);

    // Act
    let values = collect_values(&outer.concat());

    // Assert
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[test]
fn test_switch_to_latest_follows_most_recent_inner() -> anyhow::Result<()> {
    // Arrange
    let outer = PushStream::new();
    let first = PushStream::new();
    let second = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&outer.stream().switch_to_latest());

    // Act
    outer.next(first.stream());
    first.next(1);
    outer.next(second.stream());
    first.next(2);
    second.next(10);
    outer.completed();
    second.next(20);
    second.completed();

    // Assert: elements from the replaced inner stream are dropped, and
    // completion waits for the outer stream plus the current inner one.
    assert_eq!(recorder.values(), vec![1, 10, 20]);
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_switch_completes_with_outer_when_no_inner_is_live() -> anyhow::Result<()> {
    // Arrange
    let outer = PushStream::new();
    let inner = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&outer.stream().switch_to_latest());

    // Act
    outer.next(inner.stream());
    inner.next(1);
    inner.completed();
    outer.completed();

    // Assert
    assert_eq!(recorder.values(), vec![1]);
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_flat_map_merges_mapped_streams() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3]);

    // Act
    let values = collect_values(
        &source.flat_map(FlattenStrategy::Concat, |n| Stream::sequence([n, n * 10])),
    );

    // Assert
    assert_eq!(values, vec![1, 10, 2, 20, 3, 30]);
    Ok(())
}
