// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rill_stream::{Disposable, PushStream, Stream};
use rill_test_utils::{collect_values, Recorder};

#[test]
fn test_filter_keeps_only_matching_elements() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3, 4, 5]);

    // Act
    let values = collect_values(&source.filter(|n| n % 2 == 0));

    // Assert
    assert_eq!(values, vec![2, 4]);
    Ok(())
}

#[test]
fn test_distinct_suppresses_consecutive_duplicates_only() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 1, 2, 2, 1, 3, 3]);

    // Act
    let values = collect_values(&source.distinct());

    // Assert: the later 1 reappears because only adjacent repeats collapse.
    assert_eq!(values, vec![1, 2, 1, 3]);
    Ok(())
}

#[test]
fn test_distinct_by_uses_caller_equality() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence(["ab", "ax", "cd", "cx"]);

    // Act: compare by first byte only.
    let values = collect_values(&source.distinct_by(|a, b| a.as_bytes()[0] == b.as_bytes()[0]));

    // Assert
    assert_eq!(values, vec!["ab", "cd"]);
    Ok(())
}

#[test]
fn test_element_at_emits_single_element_and_completes() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([10, 20, 30, 40]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.element_at(2));

    // Assert
    assert_eq!(recorder.values(), vec![30]);
    assert!(recorder.is_completed());
    Ok(())
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "element_at index out of range")]
fn test_element_at_out_of_range_asserts_in_debug() {
    // Arrange
    let source = Stream::sequence([1, 2]);
    let recorder = Recorder::new();

    // Act: the source completes before index 5 is reached.
    recorder.subscribe(&source.element_at(5));
}

#[cfg(not(debug_assertions))]
#[test]
fn test_element_at_out_of_range_completes_empty() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.element_at(5));

    // Assert: out of range is logged and surfaces as an empty completion.
    assert!(recorder.values().is_empty());
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_first_takes_exactly_one_element() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([7, 8, 9]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.first());

    // Assert
    assert_eq!(recorder.values(), vec![7]);
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_last_emits_final_element_at_completion() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([7, 8, 9]);

    // Act
    let values = collect_values(&source.last());

    // Assert
    assert_eq!(values, vec![9]);
    Ok(())
}

#[test]
fn test_ignore_elements_propagates_only_completion() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.ignore_elements());

    // Assert
    assert!(recorder.values().is_empty());
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_skip_and_take_select_windows_of_elements() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3, 4, 5]);

    // Act & Assert
    assert_eq!(collect_values(&source.skip(2)), vec![3, 4, 5]);
    assert_eq!(collect_values(&source.take(2)), vec![1, 2]);
    assert_eq!(collect_values(&source.skip_last(2)), vec![1, 2, 3]);
    assert_eq!(collect_values(&source.take_last(2)), vec![4, 5]);
    Ok(())
}

#[test]
fn test_take_completes_early_and_stops_production() -> anyhow::Result<()> {
    // Arrange: a producer that counts how many elements it emitted.
    let produced = Arc::new(AtomicUsize::new(0));
    let source = {
        let produced = Arc::clone(&produced);
        Stream::new(move |observer| {
            for n in 0..100 {
                produced.fetch_add(1, Ordering::SeqCst);
                observer.next(n);
            }
            observer.completed();
            Disposable::noop()
        })
    };
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.take(3));

    // Assert: a synchronous producer cannot be interrupted mid-loop, but the
    // observer side must see exactly three elements and one completion.
    assert_eq!(recorder.values(), vec![0, 1, 2]);
    assert!(recorder.is_completed());
    assert_eq!(recorder.event_count(), 4);
    Ok(())
}

#[test]
fn test_take_zero_completes_immediately() -> anyhow::Result<()> {
    // Arrange
    let source = Stream::sequence([1, 2, 3]);
    let recorder = Recorder::new();

    // Act
    recorder.subscribe(&source.take(0));

    // Assert
    assert!(recorder.values().is_empty());
    assert!(recorder.is_completed());
    Ok(())
}

#[test]
fn test_pausable_gates_elements_by_latest_verdict() -> anyhow::Result<()> {
    // Arrange
    let gate = PushStream::new();
    let source = PushStream::new();
    let recorder = Recorder::new();
    recorder.subscribe(&source.stream().pausable(&gate.stream()));

    // Act: the gate starts open, closes, then reopens.
    source.next(1);
    gate.next(false);
    source.next(2);
    gate.next(true);
    source.next(3);
    source.completed();

    // Assert
    assert_eq!(recorder.values(), vec![1, 3]);
    assert!(recorder.is_completed());
    Ok(())
}
