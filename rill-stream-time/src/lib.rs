// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based operators and execution contexts for rill streams.
//!
//! Deferred and periodic work runs on a [`Scheduler`], a thin wrapper over a
//! tokio runtime handle, so all of these operators are virtual-time testable
//! with `tokio::time::pause`. Operators keep the extension-trait shape: one
//! trait per concern, implemented for [`Stream`](rill_stream::Stream).

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod debounce;
pub mod delay;
pub mod execute_in;
pub mod observe_in;
pub mod sample;
pub mod scheduler;
pub mod throttle;
pub mod timer;

pub use self::debounce::DebounceExt;
pub use self::delay::DelayExt;
pub use self::execute_in::ExecuteInExt;
pub use self::observe_in::ObserveInExt;
pub use self::sample::SampleExt;
pub use self::scheduler::Scheduler;
pub use self::throttle::ThrottleExt;
pub use self::timer::{interval, timer};
