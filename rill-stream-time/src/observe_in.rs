// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Disposable, StreamEvent};
use rill_stream::Stream;

use crate::scheduler::Scheduler;

/// Moving delivery onto a scheduler.
pub trait ObserveInExt<T> {
    /// Delivers all events on `scheduler` instead of on the producing
    /// thread, preserving order.
    fn observe_in(&self, scheduler: &Scheduler) -> Stream<T>;
}

impl<T: Clone + Send + Sync + 'static> ObserveInExt<T> for Stream<T> {
    fn observe_in(&self, scheduler: &Scheduler) -> Stream<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Stream::new(move |observer| {
            let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel::<StreamEvent<T>>();
            let drain = scheduler.spawn(async move {
                while let Some(event) = receiver.recv().await {
                    let terminal = event.is_completion();
                    observer.on(event);
                    if terminal {
                        break;
                    }
                }
            });
            let subscription = source.observe(move |event| {
                let _ = sender.send(event);
            });
            Disposable::new(move || {
                subscription.dispose();
                drain.dispose();
            })
        })
    }
}
