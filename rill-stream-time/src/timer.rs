// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use rill_stream::Stream;

use crate::scheduler::Scheduler;

/// A stream that emits `element` once, after `delay`, and completes.
pub fn timer<T>(element: T, delay: Duration, scheduler: &Scheduler) -> Stream<T>
where
    T: Clone + Send + Sync + 'static,
{
    let scheduler = scheduler.clone();
    Stream::new(move |observer| {
        let element = element.clone();
        scheduler.spawn(async move {
            tokio::time::sleep(delay).await;
            observer.next(element);
            observer.completed();
        })
    })
}

/// A stream that emits an increasing counter every `period`, forever.
/// The first element arrives one full period after subscription.
pub fn interval(period: Duration, scheduler: &Scheduler) -> Stream<u64> {
    let scheduler = scheduler.clone();
    Stream::new(move |observer| {
        scheduler.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // interval's first tick fires immediately; swallow it.
            ticker.tick().await;
            let mut count = 0u64;
            loop {
                ticker.tick().await;
                observer.next(count);
                count += 1;
            }
        })
    })
}
