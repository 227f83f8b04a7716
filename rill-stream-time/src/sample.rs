// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rill_core::{Disposable, SerialDisposable, StreamEvent};
use rill_stream::Stream;

use crate::scheduler::Scheduler;

struct SampleState<T> {
    latest: Option<T>,
    done: bool,
}

/// Periodic latest-value sampling.
pub trait SampleExt<T> {
    /// Every `period`, emits the latest element received since the previous
    /// tick, if any. An element still unsampled at completion is dropped;
    /// completion propagates right away and stops the sampling clock.
    fn sample(&self, period: Duration, scheduler: &Scheduler) -> Stream<T>;
}

impl<T: Clone + Send + Sync + 'static> SampleExt<T> for Stream<T> {
    fn sample(&self, period: Duration, scheduler: &Scheduler) -> Stream<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(SampleState::<T> {
                latest: None,
                done: false,
            }));
            let pump = SerialDisposable::new();
            {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                pump.set(scheduler.spawn(async move {
                    let mut ticker = tokio::time::interval(period);
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        // Emitting under the lock orders the sample before a
                        // racing terminal event; aborting the task cannot
                        // stop an emission already past its tick.
                        {
                            let mut state = state.lock();
                            if state.done {
                                return;
                            }
                            if let Some(element) = state.latest.take() {
                                observer.next(element);
                            }
                        }
                    }
                }));
            }
            let subscription = {
                let state = Arc::clone(&state);
                let pump = pump.clone();
                source.observe(move |event| match event {
                    StreamEvent::Next(element) => {
                        state.lock().latest = Some(element);
                    }
                    StreamEvent::Completed => {
                        state.lock().done = true;
                        pump.dispose();
                        observer.completed();
                    }
                })
            };
            Disposable::new(move || {
                subscription.dispose();
                pump.dispose();
            })
        })
    }
}
