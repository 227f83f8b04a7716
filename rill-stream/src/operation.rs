// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fallible flows and the bridges between them and plain streams.

use std::sync::Arc;

use rill_core::{Disposable, Observer, OperationEvent, RawStream, StreamEvent};

use crate::stream::Stream;

/// A cold sequence source with a failure channel, following the grammar
/// `Next* (Failed | Completed)`.
///
/// Everything else in this crate is failure-free; `Operation` is the
/// designated carrier for fallible work, and converts back to a [`Stream`]
/// once its errors are handled (see [`recover`](Operation::recover) and
/// [`suppress_failure`](Operation::suppress_failure)).
pub struct Operation<T, E> {
    raw: RawStream<OperationEvent<T, E>>,
}

impl<T, E> Clone for Operation<T, E> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T, E> Operation<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates an operation from a custom producer function.
    pub fn new(
        producer: impl Fn(Observer<OperationEvent<T, E>>) -> Disposable + Send + Sync + 'static,
    ) -> Self {
        Self {
            raw: RawStream::new(producer),
        }
    }

    /// Registers an observer; registering starts production.
    pub fn observe(
        &self,
        on_event: impl Fn(OperationEvent<T, E>) + Send + Sync + 'static,
    ) -> Disposable {
        self.raw.observe(on_event)
    }

    /// An operation that emits `element` and then completes.
    pub fn just(element: T) -> Self {
        Operation::new(move |observer| {
            observer.next(element.clone());
            observer.completed();
            Disposable::noop()
        })
    }

    /// An operation that fails immediately with `error`.
    pub fn failed(error: E) -> Self {
        Operation::new(move |observer| {
            observer.failed(error.clone());
            Disposable::noop()
        })
    }

    /// Transforms each element.
    pub fn map<U, F>(&self, transform: F) -> Operation<U, E>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let transform = Arc::new(transform);
        Operation::new(move |observer| {
            let transform = Arc::clone(&transform);
            source.observe(move |event| observer.on(event.map(transform.as_ref())))
        })
    }

    /// Transforms the error of a failure.
    pub fn map_failure<F2, F>(&self, transform: F) -> Operation<T, F2>
    where
        F2: Clone + Send + Sync + 'static,
        F: Fn(E) -> F2 + Send + Sync + 'static,
    {
        let source = self.clone();
        let transform = Arc::new(transform);
        Operation::new(move |observer| {
            let transform = Arc::clone(&transform);
            source.observe(move |event| observer.on(event.map_failure(transform.as_ref())))
        })
    }

    /// Converts to a failure-free stream by turning a failure into one last
    /// element produced by `fallback`, followed by completion.
    pub fn recover<F>(&self, fallback: F) -> Stream<T>
    where
        F: Fn(E) -> T + Send + Sync + 'static,
    {
        let source = self.clone();
        let fallback = Arc::new(fallback);
        Stream::new(move |observer| {
            let fallback = Arc::clone(&fallback);
            source.observe(move |event| match event {
                OperationEvent::Next(element) => observer.next(element),
                OperationEvent::Failed(error) => {
                    observer.next(fallback(error));
                    observer.completed();
                }
                OperationEvent::Completed => observer.completed(),
            })
        })
    }

    /// Converts to a failure-free stream by logging a failure and completing
    /// in its place.
    pub fn suppress_failure(&self) -> Stream<T>
    where
        E: std::fmt::Debug,
    {
        let source = self.clone();
        Stream::new(move |observer| {
            source.observe(move |event| match event {
                OperationEvent::Next(element) => observer.next(element),
                OperationEvent::Failed(error) => {
                    tracing::warn!(?error, "operation failure suppressed");
                    observer.completed();
                }
                OperationEvent::Completed => observer.completed(),
            })
        })
    }
}

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Widens a failure-free stream into an operation that can be composed
    /// with fallible ones. The result never emits `Failed`.
    pub fn to_operation<E>(&self) -> Operation<T, E>
    where
        E: Clone + Send + Sync + 'static,
    {
        let source = self.clone();
        Operation::new(move |observer| {
            source.observe(move |event| match event {
                StreamEvent::Next(element) => observer.next(element),
                StreamEvent::Completed => observer.completed(),
            })
        })
    }
}
