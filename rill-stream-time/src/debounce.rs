// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rill_core::{Disposable, SerialDisposable, StreamEvent};
use rill_stream::Stream;

use crate::scheduler::Scheduler;

struct DebounceState<T> {
    pending: Option<T>,
    done: bool,
}

/// Quiet-window filtering.
pub trait DebounceExt<T> {
    /// Emits an element only after `window` has passed without a newer one;
    /// each arrival restarts the clock. Completion flushes a still-pending
    /// element before propagating.
    fn debounce(&self, window: Duration, scheduler: &Scheduler) -> Stream<T>;
}

impl<T: Clone + Send + Sync + 'static> DebounceExt<T> for Stream<T> {
    fn debounce(&self, window: Duration, scheduler: &Scheduler) -> Stream<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(DebounceState::<T> {
                pending: None,
                done: false,
            }));
            let timer = SerialDisposable::new();
            let subscription = {
                let state = Arc::clone(&state);
                let timer = timer.clone();
                let scheduler = scheduler.clone();
                source.observe(move |event| match event {
                    StreamEvent::Next(element) => {
                        state.lock().pending = Some(element);
                        let observer = observer.clone();
                        let state = Arc::clone(&state);
                        timer.set(scheduler.schedule_once(window, move || {
                            // Emitting under the lock keeps the flush ordered
                            // before a racing terminal event; once `done` is
                            // set, an in-flight flush must not fire.
                            let mut state = state.lock();
                            if state.done {
                                return;
                            }
                            if let Some(element) = state.pending.take() {
                                observer.next(element);
                            }
                        }));
                    }
                    StreamEvent::Completed => {
                        let flushed = {
                            let mut state = state.lock();
                            state.done = true;
                            state.pending.take()
                        };
                        timer.dispose();
                        if let Some(element) = flushed {
                            observer.next(element);
                        }
                        observer.completed();
                    }
                })
            };
            Disposable::new(move || {
                subscription.dispose();
                timer.dispose();
            })
        })
    }
}
