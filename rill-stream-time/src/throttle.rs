// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rill_core::StreamEvent;
use rill_stream::Stream;
use tokio::time::Instant;

/// Rate limiting on the leading edge.
pub trait ThrottleExt<T> {
    /// Emits an element, then drops everything arriving within the next
    /// `interval`. The first element always passes.
    fn throttle(&self, interval: Duration) -> Stream<T>;
}

impl<T: Clone + Send + Sync + 'static> ThrottleExt<T> for Stream<T> {
    fn throttle(&self, interval: Duration) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let last_emit: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let now = Instant::now();
                    let pass = {
                        let mut last_emit = last_emit.lock();
                        let due = match *last_emit {
                            None => true,
                            Some(last) => now.duration_since(last) >= interval,
                        };
                        if due {
                            *last_emit = Some(now);
                        }
                        due
                    };
                    if pass {
                        observer.next(element);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }
}
