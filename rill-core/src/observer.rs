// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;

use crate::operation_event::OperationEvent;
use crate::stream_event::StreamEvent;

/// A sink receiving events from a subscription.
///
/// Observers carry no state of their own; they are cheap to clone and all
/// clones feed the same underlying callable. Lifetime is bound to whoever
/// captured the callable.
pub struct Observer<E> {
    on_event: Arc<dyn Fn(E) + Send + Sync>,
}

impl<E> Clone for Observer<E> {
    fn clone(&self) -> Self {
        Self {
            on_event: Arc::clone(&self.on_event),
        }
    }
}

impl<E> Observer<E> {
    /// Wraps a callable into an observer.
    pub fn new(on_event: impl Fn(E) + Send + Sync + 'static) -> Self {
        Self {
            on_event: Arc::new(on_event),
        }
    }

    /// Delivers an event to the sink.
    pub fn on(&self, event: E) {
        (self.on_event)(event);
    }
}

impl<T> Observer<StreamEvent<T>> {
    /// Delivers a `Next` event carrying `element`.
    pub fn next(&self, element: T) {
        self.on(StreamEvent::Next(element));
    }

    /// Delivers the `Completed` event.
    pub fn completed(&self) {
        self.on(StreamEvent::Completed);
    }
}

impl<T, E> Observer<OperationEvent<T, E>> {
    /// Delivers a `Next` event carrying `element`.
    pub fn next(&self, element: T) {
        self.on(OperationEvent::Next(element));
    }

    /// Delivers a terminal `Failed` event.
    pub fn failed(&self, error: E) {
        self.on(OperationEvent::Failed(error));
    }

    /// Delivers the `Completed` event.
    pub fn completed(&self) {
        self.on(OperationEvent::Completed);
    }
}
