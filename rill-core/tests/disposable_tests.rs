// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rill_core::{Disposable, DisposeBag, SerialDisposable};

fn counting_disposable(counter: &Arc<AtomicUsize>) -> Disposable {
    let counter = Arc::clone(counter);
    Disposable::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_dispose_runs_teardown_exactly_once() {
    // Arrange
    let counter = Arc::new(AtomicUsize::new(0));
    let disposable = counting_disposable(&counter);

    // Act
    disposable.dispose();
    disposable.dispose();
    disposable.dispose();

    // Assert
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(disposable.is_disposed());
}

#[test]
fn test_clones_share_once_semantics() {
    // Arrange
    let counter = Arc::new(AtomicUsize::new(0));
    let disposable = counting_disposable(&counter);
    let clone = disposable.clone();

    // Act
    clone.dispose();
    disposable.dispose();

    // Assert
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(disposable.is_disposed());
    assert!(clone.is_disposed());
}

#[test]
fn test_serial_disposes_replaced_disposable() {
    // Arrange
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let serial = SerialDisposable::new();

    // Act
    serial.set(counting_disposable(&first));
    serial.set(counting_disposable(&second));

    // Assert: exactly the replaced disposable is disposed
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);

    serial.dispose();
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_serial_set_after_dispose_disposes_incoming() {
    // Arrange
    let counter = Arc::new(AtomicUsize::new(0));
    let serial = SerialDisposable::new();
    serial.dispose();

    // Act
    serial.set(counting_disposable(&counter));

    // Assert: no leak past the cancellation point
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_serial_as_disposable_shares_state() {
    // Arrange
    let counter = Arc::new(AtomicUsize::new(0));
    let serial = SerialDisposable::new();
    serial.set(counting_disposable(&counter));
    let handle = serial.as_disposable();

    // Act
    handle.dispose();

    // Assert
    assert!(serial.is_disposed());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_bag_disposes_on_drop() {
    // Arrange
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    // Act
    {
        let bag = DisposeBag::new();
        bag.insert(counting_disposable(&first));
        bag.insert(counting_disposable(&second));
        assert_eq!(bag.len(), 2);
    }

    // Assert
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn test_bag_insert_after_dispose_disposes_immediately() {
    // Arrange
    let counter = Arc::new(AtomicUsize::new(0));
    let bag = DisposeBag::new();
    bag.dispose();

    // Act
    bag.insert(counting_disposable(&counter));

    // Assert
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(bag.is_empty());
}
