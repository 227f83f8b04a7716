// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Disposable, DisposeBag, Multicast, Observer, PublishSubject, StreamEvent, SubjectError};

use crate::bindable::Bindable;
use crate::stream::Stream;

/// A hot, imperatively driven stream: the owner pushes events in, attached
/// observers receive them live.
///
/// `PushStream` also owns a [`DisposeBag`], so bindings made through
/// [`Bindable`] are torn down when the push stream is dropped.
pub struct PushStream<T> {
    subject: PublishSubject<StreamEvent<T>>,
    bag: DisposeBag,
}

impl<T: Clone + Send + Sync + 'static> PushStream<T> {
    pub fn new() -> Self {
        Self {
            subject: PublishSubject::new(),
            bag: DisposeBag::new(),
        }
    }

    /// Pushes an element to all current observers.
    pub fn next(&self, element: T) {
        self.subject.push(StreamEvent::Next(element));
    }

    /// Terminates the stream. Further pushes are dropped with a warning.
    pub fn completed(&self) {
        self.subject.push(StreamEvent::Completed);
    }

    /// Pushes a raw event.
    pub fn on(&self, event: StreamEvent<T>) {
        self.subject.push(event);
    }

    /// Pushes a raw event, failing if the stream has already terminated.
    pub fn try_on(&self, event: StreamEvent<T>) -> Result<(), SubjectError> {
        self.subject.try_push(event)
    }

    /// Attaches an observer for live events. An observer attaching after
    /// termination immediately receives one `Completed`.
    pub fn observe(&self, on_event: impl Fn(StreamEvent<T>) + Send + Sync + 'static) -> Disposable {
        self.subject.attach(Observer::new(on_event))
    }

    /// The observer side as a composable [`Stream`].
    pub fn stream(&self) -> Stream<T> {
        let subject = self.subject.clone();
        Stream::new(move |observer| subject.attach(observer))
    }

    /// `true` once [`completed`](PushStream::completed) has been called.
    pub fn is_terminated(&self) -> bool {
        self.subject.is_terminated()
    }

    /// Number of currently attached observers.
    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for PushStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Bindable for PushStream<T> {
    type Element = T;

    fn observer(&self, disconnect: Disposable) -> Observer<StreamEvent<T>> {
        self.bag.insert(disconnect);
        let subject = self.subject.clone();
        Observer::new(move |event| subject.push(event))
    }
}
