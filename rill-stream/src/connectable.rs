// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast: turning a cold stream into a shared, explicitly driven one.

use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::{Disposable, Multicast, Observer, PublishSubject, ReplaySubject, StreamEvent};

use crate::stream::Stream;

/// A stream whose single upstream subscription is started explicitly with
/// [`connect`](ConnectableStream::connect) rather than by the first observer.
///
/// Observers attach to a shared hub; until `connect` is called they receive
/// nothing. All events from the one upstream subscription are fanned out
/// through the hub, so every observer sees the same production.
pub struct ConnectableStream<T> {
    source: Stream<T>,
    hub: Arc<dyn Multicast<StreamEvent<T>>>,
    connection: Arc<Mutex<Option<Disposable>>>,
}

impl<T> Clone for ConnectableStream<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            hub: Arc::clone(&self.hub),
            connection: Arc::clone(&self.connection),
        }
    }
}

struct RefCountState {
    observers: usize,
    connection: Option<Disposable>,
}

impl<T: Clone + Send + Sync + 'static> ConnectableStream<T> {
    /// Pairs a source stream with the hub that will fan its events out.
    pub fn new(source: Stream<T>, hub: Arc<dyn Multicast<StreamEvent<T>>>) -> Self {
        Self {
            source,
            hub,
            connection: Arc::new(Mutex::new(None)),
        }
    }

    /// Attaches an observer to the hub. No production is started; events
    /// arrive only while a connection is live (or from the hub's replay
    /// buffer, if it keeps one).
    pub fn observe(&self, on_event: impl Fn(StreamEvent<T>) + Send + Sync + 'static) -> Disposable {
        self.hub.attach(Observer::new(on_event))
    }

    /// The hub's observer side as a plain [`Stream`].
    pub fn stream(&self) -> Stream<T> {
        let hub = Arc::clone(&self.hub);
        Stream::new(move |observer| hub.attach(observer))
    }

    /// Starts (or joins) the single upstream subscription.
    ///
    /// The first call subscribes the source with the hub as observer and
    /// returns the connection handle; further calls while that connection is
    /// live return the same handle. Disposing it severs the source from the
    /// hub, after which `connect` may start a fresh connection.
    pub fn connect(&self) -> Disposable {
        let mut connection = self.connection.lock();
        if let Some(live) = connection.as_ref() {
            if !live.is_disposed() {
                return live.clone();
            }
        }
        let hub = Arc::clone(&self.hub);
        let subscription = self.source.observe(move |event| hub.push(event));
        *connection = Some(subscription.clone());
        subscription
    }

    /// A stream that connects on the first observer and disconnects when the
    /// last observer detaches.
    ///
    /// The 0-to-1 and 1-to-0 transitions are serialized through one lock, so
    /// two racing first observers share a single connection.
    pub fn ref_count(&self) -> Stream<T> {
        let connectable = self.clone();
        let state = Arc::new(Mutex::new(RefCountState {
            observers: 0,
            connection: None,
        }));
        Stream::new(move |observer| {
            let attachment = connectable.hub.attach(observer);
            {
                let mut state = state.lock();
                state.observers += 1;
                if state.observers == 1 {
                    state.connection = Some(connectable.connect());
                }
            }
            let state = Arc::clone(&state);
            Disposable::new(move || {
                attachment.dispose();
                let released = {
                    let mut state = state.lock();
                    state.observers -= 1;
                    if state.observers == 0 {
                        state.connection.take()
                    } else {
                        None
                    }
                };
                if let Some(connection) = released {
                    connection.dispose();
                }
            })
        })
    }
}

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Multicasts through a [`PublishSubject`]: observers see only events
    /// produced while connected.
    pub fn publish(&self) -> ConnectableStream<T> {
        ConnectableStream::new(self.clone(), Arc::new(PublishSubject::new()))
    }

    /// Multicasts through a [`ReplaySubject`] keeping up to `limit` recent
    /// elements (`None` for unbounded): late observers first receive the
    /// buffered elements.
    pub fn replay(&self, limit: Option<usize>) -> ConnectableStream<T> {
        ConnectableStream::new(self.clone(), Arc::new(ReplaySubject::with_limit(limit)))
    }

    /// [`replay`](Stream::replay) combined with
    /// [`ref_count`](ConnectableStream::ref_count): connects on first demand
    /// and replays the buffer to late observers.
    pub fn share_replay(&self, limit: Option<usize>) -> Stream<T> {
        self.replay(limit).ref_count()
    }
}
