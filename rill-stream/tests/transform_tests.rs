// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rill_stream::{Stream, StreamEvent};
use rill_test_utils::{collect_values, Recorder};

#[test]
fn test_map_transforms_each_element() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3]);

    // Act
    let values = collect_values(&source.map(|n| n * 10));

    // Assert
    assert_eq!(values, vec![10, 20, 30]);
    Ok(())
}

#[test]
fn test_buffer_groups_and_discards_partial_tail() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3, 4, 5]);

    // Act
    let buffers = collect_values(&source.buffer(2));

    // Assert: the trailing [5] never fills and is discarded at completion.
    assert_eq!(buffers, vec![vec![1, 2], vec![3, 4]]);
    Ok(())
}

#[test]
fn test_window_emits_streams_of_buffered_elements() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3, 4]);
    let windows = Recorder::new();

    // Act
    let subscription = windows.subscribe(&source.window(2));
    let contents: Vec<Vec<i32>> = windows
        .values()
        .iter()
        .map(collect_values)
        .collect();
    subscription.dispose();

    // Assert
    assert_eq!(contents, vec![vec![1, 2], vec![3, 4]]);
    assert!(windows.is_completed());
    Ok(())
}

#[test]
fn test_scan_emits_running_accumulation_without_seed() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3]);

    // Act
    let values = collect_values(&source.scan(0, |acc, n| acc + n));

    // Assert
    assert_eq!(values, vec![1, 3, 6]);
    Ok(())
}

#[test]
fn test_reduce_emits_only_final_accumulation() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3, 4]);

    // Act
    let values = collect_values(&source.reduce(0, |acc, n| acc + n));

    // Assert
    assert_eq!(values, vec![10]);
    Ok(())
}

#[test]
fn test_reduce_on_empty_stream_emits_initial() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::<i32>::empty();

    // Act
    let values = collect_values(&source.reduce(42, |acc, n| acc + n));

    // Assert
    assert_eq!(values, vec![42]);
    Ok(())
}

#[test]
fn test_collect_gathers_all_elements_into_one_vec() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence(["a", "b", "c"]);

    // Act
    let values = collect_values(&source.collect());

    // Assert
    assert_eq!(values, vec![vec!["a", "b", "c"]]);
    Ok(())
}

#[test]
fn test_zip_previous_pairs_each_element_with_predecessor() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3]);

    // Act
    let values = collect_values(&source.zip_previous());

    // Assert
    assert_eq!(values, vec![(None, 1), (Some(1), 2), (Some(2), 3)]);
    Ok(())
}

#[test]
fn test_default_if_empty_substitutes_on_empty_source() -> anyhow::Result<()> {
    // Arrange
    let empty = Stream::<i32>::empty();
    let nonempty = Stream::sequence([7]);

    // Act
    let defaulted = collect_values(&empty.default_if_empty(99));
    let untouched = collect_values(&nonempty.default_if_empty(99));

    // Assert
    assert_eq!(defaulted, vec![99]);
    assert_eq!(untouched, vec![7]);
    Ok(())
}

#[test]
fn test_tap_sees_every_event_without_altering_them() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(AtomicUsize::new(0));
    let source = Stream::sequence([1, 2, 3]);
    let tapped = {
        let seen = Arc::clone(&seen);
        source.tap(move |_event: &StreamEvent<i32>| {
            seen.fetch_add(1, Ordering::SeqCst);
        })
    };

    // Act
    let values = collect_values(&tapped);

    // Assert: three elements plus the completion.
    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(seen.load(Ordering::SeqCst), 4);
    Ok(())
}

#[test]
fn test_cold_stream_replays_for_every_observer() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2]).map(|n| n + 1);

    // Act
    let first = collect_values(&source);
    let second = collect_values(&source);

    // Assert
    assert_eq!(first, second);
    assert_eq!(first, vec![2, 3]);
    Ok(())
}
