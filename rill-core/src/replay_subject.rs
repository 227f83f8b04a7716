// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::disposable::Disposable;
use crate::event_type::EventType;
use crate::multicast::Multicast;
use crate::observer::Observer;
use crate::subject_error::SubjectError;

struct ReplayRegistry<E> {
    limit: Option<usize>,
    buffer: VecDeque<E>,
    terminal: Option<E>,
    next_token: u64,
    observers: Vec<(u64, Observer<E>)>,
}

/// A multicast hub buffering the most recent non-terminal events and
/// replaying them synchronously to every new observer at attachment, before
/// live delivery begins.
///
/// Replay and registration happen atomically under the registry lock, so a
/// new observer sees every event exactly once regardless of concurrent
/// pushes. The flip side of that atomicity: observers must not synchronously
/// re-enter the same subject from the replayed callbacks.
pub struct ReplaySubject<E> {
    registry: Arc<Mutex<ReplayRegistry<E>>>,
}

impl<E> Clone for ReplaySubject<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: EventType + Clone> ReplaySubject<E> {
    /// An unbounded replay subject.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// A replay subject keeping at most `limit` recent events (`None` for
    /// unbounded).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(ReplayRegistry {
                limit,
                buffer: VecDeque::new(),
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
                registry.buffer.push_back(event.clone());
                if let Some(limit) = registry.limit {
                    while registry.buffer.len() > limit {
                        registry.buffer.pop_front();
                    }
                }
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

impl<E: EventType + Clone> Default for ReplaySubject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventType + Clone> Multicast<E> for ReplaySubject<E> {
    fn push(&self, event: E) {
        ReplaySubject::push(self, event);
    }

    fn attach(&self, observer: Observer<E>) -> Disposable {
        let token = {
            let mut registry = self.registry.lock();
            for event in registry.buffer.iter() {
                observer.on(event.clone());
            }
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
