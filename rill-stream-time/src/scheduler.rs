// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;
use std::time::Duration;

use rill_core::Disposable;
use tokio::runtime::Handle;

/// An execution context: a handle to the runtime that carries out deferred
/// and repeated work for the time-based operators.
///
/// Every scheduling method returns a [`Disposable`] that cancels the pending
/// work; cancelling work that already ran is a no-op.
#[derive(Clone, Debug)]
pub struct Scheduler {
    handle: Handle,
}

impl Scheduler {
    /// The scheduler of the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics outside a tokio runtime context, like
    /// [`Handle::current`].
    pub fn current() -> Self {
        Self {
            handle: Handle::current(),
        }
    }

    /// A scheduler executing on the given runtime handle.
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// Runs `task` on this scheduler as soon as possible.
    pub fn execute(&self, task: impl FnOnce() + Send + 'static) -> Disposable {
        self.spawn(async move { task() })
    }

    /// Runs `task` on this scheduler after `delay`.
    pub fn schedule_once(&self, delay: Duration, task: impl FnOnce() + Send + 'static) -> Disposable {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }

    /// Spawns a future on this scheduler; disposing aborts it.
    pub fn spawn(&self, future: impl Future<Output = ()> + Send + 'static) -> Disposable {
        let join = self.handle.spawn(future);
        Disposable::new(move || join.abort())
    }
}
