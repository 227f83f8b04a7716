// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Disposable, SerialDisposable};
use rill_stream::Stream;

use crate::scheduler::Scheduler;

/// Moving subscription onto a scheduler.
pub trait ExecuteInExt<T> {
    /// Runs the producer on `scheduler`: the upstream subscription itself is
    /// made from a scheduled task rather than from the observing call site.
    fn execute_in(&self, scheduler: &Scheduler) -> Stream<T>;
}

impl<T: Clone + Send + Sync + 'static> ExecuteInExt<T> for Stream<T> {
    fn execute_in(&self, scheduler: &Scheduler) -> Stream<T> {
        let source = self.clone();
        let scheduler = scheduler.clone();
        Stream::new(move |observer| {
            let upstream = SerialDisposable::new();
            let task = {
                let source = source.clone();
                let upstream = upstream.clone();
                scheduler.execute(move || {
                    upstream.set(source.observe_with(observer));
                })
            };
            Disposable::new(move || {
                task.dispose();
                upstream.dispose();
            })
        })
    }
}
