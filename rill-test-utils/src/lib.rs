// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Instrumentation used by the test suites: an event-recording observer and
//! a bindable cell for exercising binding lifecycles.

use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::{Disposable, DisposeBag, Observer, StreamEvent};
use rill_stream::{Bindable, Stream};

/// Records every event a stream delivers, for later assertion.
pub struct Recorder<T> {
    events: Arc<Mutex<Vec<StreamEvent<T>>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribes to `stream`, recording events as they arrive.
    pub fn subscribe(&self, stream: &Stream<T>) -> Disposable {
        let events = Arc::clone(&self.events);
        stream.observe(move |event| events.lock().push(event))
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<StreamEvent<T>> {
        self.events.lock().clone()
    }

    /// The elements recorded so far, in delivery order.
    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| event.element().cloned())
            .collect()
    }

    /// `true` once a `Completed` has been recorded.
    pub fn is_completed(&self) -> bool {
        self.events.lock().iter().any(StreamEvent::is_completion)
    }

    /// Number of recorded events, terminal included.
    pub fn event_count(&self) -> usize {
        self.events.lock().len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscribes, drains a synchronous stream and returns its elements.
pub fn collect_values<T: Clone + Send + Sync + 'static>(stream: &Stream<T>) -> Vec<T> {
    let recorder = Recorder::new();
    let subscription = recorder.subscribe(stream);
    subscription.dispose();
    recorder.values()
}

/// A one-slot [`Bindable`] target holding the latest bound element.
pub struct BoundCell<T> {
    value: Arc<Mutex<Option<T>>>,
    bag: DisposeBag,
}

impl<T: Clone + Send + Sync + 'static> BoundCell<T> {
    pub fn new() -> Self {
        Self {
            value: Arc::new(Mutex::new(None)),
            bag: DisposeBag::new(),
        }
    }

    /// The most recently received element, if any.
    pub fn get(&self) -> Option<T> {
        self.value.lock().clone()
    }

    /// Number of binding disconnect handles this cell holds.
    pub fn binding_count(&self) -> usize {
        self.bag.len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for BoundCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Bindable for BoundCell<T> {
    type Element = T;

    fn observer(&self, disconnect: Disposable) -> Observer<StreamEvent<T>> {
        self.bag.insert(disconnect);
        let value = Arc::clone(&self.value);
        Observer::new(move |event| {
            if let StreamEvent::Next(element) = event {
                *value.lock() = Some(element);
            }
        })
    }
}
