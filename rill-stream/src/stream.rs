// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use rill_core::{Disposable, Observer, RawStream, StreamEvent};

/// A cold, potentially multi-shot sequence source following the grammar
/// `Next* Completed`.
///
/// `Stream` is a thin wrapper pairing a [`RawStream`] of [`StreamEvent`]s
/// with the operator surface; it carries no state of its own and is cheap to
/// clone. Every [`observe`](Stream::observe) call runs the producer afresh —
/// two observers see independent production unless the stream has been made
/// connectable (see [`publish`](Stream::publish)).
pub struct Stream<T> {
    raw: RawStream<StreamEvent<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Creates a stream from a custom producer function.
    ///
    /// The producer is invoked once per observer; it begins production and
    /// returns the disposable that stops it.
    pub fn new(
        producer: impl Fn(Observer<StreamEvent<T>>) -> Disposable + Send + Sync + 'static,
    ) -> Self {
        Self {
            raw: RawStream::new(producer),
        }
    }

    /// Wraps an existing raw stream.
    pub fn from_raw(raw: RawStream<StreamEvent<T>>) -> Self {
        Self { raw }
    }

    /// The underlying raw stream.
    pub fn raw(&self) -> &RawStream<StreamEvent<T>> {
        &self.raw
    }

    /// Registers an observer; registering starts production. Disposing the
    /// returned disposable cancels the subscription and stops delivery.
    pub fn observe(&self, on_event: impl Fn(StreamEvent<T>) + Send + Sync + 'static) -> Disposable {
        self.raw.observe(on_event)
    }

    /// Like [`observe`](Stream::observe), for an already-built observer.
    pub fn observe_with(&self, observer: Observer<StreamEvent<T>>) -> Disposable {
        self.raw.observe_with(observer)
    }

    /// A stream that emits `element` and then completes.
    pub fn just(element: T) -> Self {
        Stream::new(move |observer| {
            observer.next(element.clone());
            observer.completed();
            Disposable::noop()
        })
    }

    /// A stream that emits the given sequence of elements in order and then
    /// completes.
    pub fn sequence(elements: impl IntoIterator<Item = T>) -> Self {
        let elements: Arc<Vec<T>> = Arc::new(elements.into_iter().collect());
        Stream::new(move |observer| {
            for element in elements.iter() {
                observer.next(element.clone());
            }
            observer.completed();
            Disposable::noop()
        })
    }

    /// A stream that completes without emitting any elements.
    pub fn empty() -> Self {
        Stream::new(|observer| {
            observer.completed();
            Disposable::noop()
        })
    }

    /// A stream that never emits and never completes.
    pub fn never() -> Self {
        Stream::new(|_observer| Disposable::noop())
    }
}
