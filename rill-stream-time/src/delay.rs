// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use rill_core::{Disposable, StreamEvent};
use rill_stream::Stream;
use tokio::time::Instant;

use crate::scheduler::Scheduler;

/// Time-shifted delivery.
pub trait DelayExt<T> {
    /// Delivers every event, completion included, `delay` after it arrived,
    /// preserving order.
    fn delay(&self, delay: Duration, scheduler: &Scheduler) -> Stream<T>;
}

impl<T: Clone + Send + Sync + 'static> DelayExt<T> for Stream<T> {
    fn delay(&self, delay: Duration, scheduler: &Scheduler) -> Stream<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Stream::new(move |observer| {
            let (sender, mut receiver) =
                tokio::sync::mpsc::unbounded_channel::<(Instant, StreamEvent<T>)>();
            // One drain task keeps delivery ordered even when deadlines
            // coincide.
            let drain = scheduler.spawn(async move {
                while let Some((deadline, event)) = receiver.recv().await {
                    tokio::time::sleep_until(deadline).await;
                    let terminal = event.is_completion();
                    observer.on(event);
                    if terminal {
                        break;
                    }
                }
            });
            let subscription = source.observe(move |event| {
                let deadline = Instant::now() + delay;
                if sender.send((deadline, event)).is_err() {
                    tracing::debug!("delay drain task gone; event dropped");
                }
            });
            Disposable::new(move || {
                subscription.dispose();
                drain.dispose();
            })
        })
    }
}
