// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot fan-out hub without replay.
//!
//! Late observers only see events pushed after they attach, with one
//! exception: attaching after the subject has terminated immediately delivers
//! a single terminal event (see [`PublishSubject::attach`]).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::disposable::Disposable;
use crate::event_type::EventType;
use crate::multicast::Multicast;
use crate::observer::Observer;
use crate::subject_error::SubjectError;

struct Registry<E> {
    terminal: Option<E>,
    next_token: u64,
    observers: Vec<(u64, Observer<E>)>,
}

/// A hot subject multicasting pushed events to all attached observers in
/// attachment order.
///
/// Cheap to clone; all clones share the same registry. Delivery happens
/// outside the registry lock (the observer list is snapshotted per push), so
/// observers may attach, detach or push from within a callback. Concurrent
/// `push` calls from different threads are not ordered against each other;
/// callers serialize pushes from a single owner.
pub struct PublishSubject<E> {
    registry: Arc<Mutex<Registry<E>>>,
}

impl<E> Clone for PublishSubject<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: EventType + Clone> PublishSubject<E> {
    /// A fresh subject with no observers.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                terminal: None,
                next_token: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// Pushes an event, failing if the subject has already terminated.
    pub fn try_push(&self, event: E) -> Result<(), SubjectError> {
        let snapshot: Vec<Observer<E>> = {
            let mut registry = self.registry.lock();
            if registry.terminal.is_some() {
                return Err(SubjectError::Completed);
            }
            if event.is_terminal() {
                registry.terminal = Some(event.clone());
                registry.observers.drain(..).map(|(_, o)| o).collect()
            } else {
                registry.observers.iter().map(|(_, o)| o.clone()).collect()
            }
        };
        for observer in snapshot {
            observer.on(event.clone());
        }
        Ok(())
    }

    /// Pushes an event; a push after termination is tolerated misuse and is
    /// dropped with a warning.
    pub fn push(&self, event: E) {
        if self.try_push(event).is_err() {
            tracing::warn!("event pushed into a terminated subject; dropped");
        }
    }

    /// Number of currently attached observers.
    pub fn observer_count(&self) -> usize {
        self.registry.lock().observers.len()
    }

    /// `true` once a terminal event has been pushed.
    pub fn is_terminated(&self) -> bool {
        self.registry.lock().terminal.is_some()
    }
}

impl<E: EventType + Clone> Default for PublishSubject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventType + Clone> Multicast<E> for PublishSubject<E> {
    fn push(&self, event: E) {
        PublishSubject::push(self, event);
    }

    /// Registers an observer. An observer attaching after termination
    /// immediately receives the terminal event the subject ended with and a
    /// no-op disposable, so the event grammar holds for every observer and
    /// a failure terminal is not downgraded to a completion.
    fn attach(&self, observer: Observer<E>) -> Disposable {
        let token = {
            let mut registry = self.registry.lock();
            if let Some(terminal) = registry.terminal.clone() {
                drop(registry);
                observer.on(terminal);
                return Disposable::noop();
            }
            let token = registry.next_token;
            registry.next_token += 1;
            registry.observers.push((token, observer));
            token
        };
        let registry = Arc::clone(&self.registry);
        Disposable::new(move || {
            registry.lock().observers.retain(|(t, _)| *t != token);
        })
    }
}
