// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::disposable::Disposable;
use crate::event_type::EventType;
use crate::observer::Observer;
use crate::serial_disposable::SerialDisposable;

const ACTIVE: u8 = 0;
const DISPOSED: u8 = 1;
const TERMINATED: u8 = 2;

/// The cold producer core.
///
/// A raw stream stores a producer `Fn(Observer) -> Disposable`. Every call to
/// [`observe`](RawStream::observe) invokes the producer afresh with a wrapped
/// observer, so two observers see independent production unless the stream is
/// made connectable upstream.
///
/// The wrapper enforces the subscription contract:
///
/// - after the subscription is disposed, events are silently dropped;
/// - after a terminal event, the producer's disposable is disposed (cleanup
///   runs exactly once even when disposal races natural completion);
/// - events arriving after termination are a contract violation and are
///   reported, never forwarded.
pub struct RawStream<E> {
    producer: Arc<dyn Fn(Observer<E>) -> Disposable + Send + Sync>,
}

impl<E> Clone for RawStream<E> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<E: EventType> RawStream<E> {
    /// Wraps a producer function into a raw stream.
    pub fn new(producer: impl Fn(Observer<E>) -> Disposable + Send + Sync + 'static) -> Self {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Starts production for the given callable and returns the subscription
    /// handle. Disposing the handle stops production and prevents any
    /// further delivery.
    pub fn observe(&self, on_event: impl Fn(E) + Send + Sync + 'static) -> Disposable {
        self.observe_with(Observer::new(on_event))
    }

    /// Like [`observe`](RawStream::observe), for an already-built observer.
    pub fn observe_with(&self, observer: Observer<E>) -> Disposable {
        let phase = Arc::new(AtomicU8::new(ACTIVE));
        let upstream = SerialDisposable::new();

        let wrapped = {
            let phase = Arc::clone(&phase);
            let upstream = upstream.clone();
            Observer::new(move |event: E| {
                match phase.load(Ordering::Acquire) {
                    DISPOSED => return,
                    TERMINATED => {
                        tracing::error!("event delivered after stream termination; dropped");
                        debug_assert!(false, "event delivered after stream termination");
                        return;
                    }
                    _ => {}
                }
                let terminal = event.is_terminal();
                observer.on(event);
                if terminal {
                    let _ = phase.compare_exchange(
                        ACTIVE,
                        TERMINATED,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    );
                    upstream.dispose();
                }
            })
        };

        let produced = (self.producer)(wrapped);
        upstream.set(produced);

        Disposable::new(move || {
            let _ = phase.compare_exchange(ACTIVE, DISPOSED, Ordering::AcqRel, Ordering::Acquire);
            upstream.dispose();
        })
    }
}
