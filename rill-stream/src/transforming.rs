// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Transformation operators: per-element mapping, stateful accumulation,
//! batching and side-effect observation.
//!
//! All operator-local state (buffer accumulators, previous-value trackers)
//! is owned exclusively by the subscription instance that created it; two
//! observers of the same cold stream never share state.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::StreamEvent;

use crate::stream::Stream;

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Transforms each element by applying `transform` on it; `Completed`
    /// passes through unchanged.
    pub fn map<U, F>(&self, transform: F) -> Stream<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let transform = Arc::new(transform);
        Stream::new(move |observer| {
            let transform = Arc::clone(&transform);
            source.observe(move |event| observer.on(event.map(|element| transform(element))))
        })
    }

    /// Batches elements into arrays of exactly `size`. On completion any
    /// partial batch is discarded, not flushed.
    pub fn buffer(&self, size: usize) -> Stream<Vec<T>> {
        assert!(size > 0, "buffer size must be positive");
        let source = self.clone();
        Stream::new(move |observer| {
            let pending: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::with_capacity(size)));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let full = {
                        let mut pending = pending.lock();
                        pending.push(element);
                        if pending.len() == size {
                            Some(std::mem::take(&mut *pending))
                        } else {
                            None
                        }
                    };
                    if let Some(batch) = full {
                        observer.next(batch);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Batches each `size` elements into an inner stream.
    pub fn window(&self, size: usize) -> Stream<Stream<T>> {
        self.buffer(size).map(Stream::sequence)
    }

    /// Applies `combine` to each element starting from `initial` and emits
    /// every intermediate accumulator. The seed itself is not emitted.
    pub fn scan<U, F>(&self, initial: U, combine: F) -> Stream<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let combine = Arc::new(combine);
        Stream::new(move |observer| {
            let accumulator = Arc::new(Mutex::new(initial.clone()));
            let combine = Arc::clone(&combine);
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let updated = {
                        let mut accumulator = accumulator.lock();
                        let next = combine(accumulator.clone(), element);
                        *accumulator = next.clone();
                        next
                    };
                    observer.next(updated);
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Folds `combine` over all elements starting from `initial` and emits
    /// only the final accumulator, at completion. The seed counts as the
    /// result for an empty stream.
    pub fn reduce<U, F>(&self, initial: U, combine: F) -> Stream<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let combine = Arc::new(combine);
        Stream::new(move |observer| {
            observer.next(initial.clone());
            let combine = Arc::clone(&combine);
            source
                .scan(initial.clone(), move |accumulator, element| {
                    combine(accumulator, element)
                })
                .observe(move |event| observer.on(event))
        })
        .last()
    }

    /// Collects all elements into one array emitted at completion.
    pub fn collect(&self) -> Stream<Vec<T>> {
        self.reduce(Vec::new(), |mut collected, element| {
            collected.push(element);
            collected
        })
    }

    /// Pairs each element with its predecessor; the first element is paired
    /// with `None`.
    pub fn zip_previous(&self) -> Stream<(Option<T>, T)> {
        let source = self.clone();
        Stream::new(move |observer| {
            let previous: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let earlier = previous.lock().replace(element.clone());
                    observer.next((earlier, element));
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Emits `default` if the stream completes without emitting any element.
    pub fn default_if_empty(&self, default: T) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let emitted = Arc::new(AtomicBool::new(false));
            let default = default.clone();
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    emitted.store(true, Ordering::Release);
                    observer.next(element);
                }
                StreamEvent::Completed => {
                    if !emitted.load(Ordering::Acquire) {
                        observer.next(default.clone());
                    }
                    observer.completed();
                }
            })
        })
    }

    /// Runs `on_event` for every event before forwarding it.
    pub fn tap<F>(&self, on_event: F) -> Stream<T>
    where
        F: Fn(&StreamEvent<T>) + Send + Sync + 'static,
    {
        let source = self.clone();
        let on_event = Arc::new(on_event);
        Stream::new(move |observer| {
            let on_event = Arc::clone(&on_event);
            source.observe(move |event| {
                on_event(&event);
                observer.on(event);
            })
        })
    }

    /// Logs every event through `tracing` under the given stream id.
    pub fn debug(&self, id: &str) -> Stream<T>
    where
        T: fmt::Debug,
    {
        let id = id.to_owned();
        self.tap(move |event| match event {
            StreamEvent::Next(element) => tracing::debug!(stream = %id, ?element, "next"),
            StreamEvent::Completed => tracing::debug!(stream = %id, "completed"),
        })
    }
}
