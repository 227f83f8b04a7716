// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rill
//!
//! A push-based reactive stream library: cold [`Stream`]s with an explicit
//! disposal discipline, hot [`PushStream`]s, multicast via
//! [`ConnectableStream`], one-way binding through [`Bindable`], and
//! time-based operators running on a [`Scheduler`].
//!
//! ## Overview
//!
//! Events follow the grammar `Next* Completed`: a stream emits zero or more
//! elements and at most one completion. Observing a cold stream starts a
//! fresh production; the returned [`Disposable`] cancels it. Subjects and
//! connectable streams share one production among many observers.
//!
//! ## Quick Start
//!
//! ```rust
//! use rill_rx::prelude::*;
//!
//! let doubled = Stream::sequence([1, 2, 3]).map(|n| n * 2);
//! let subscription = doubled.observe(|event| println!("{event:?}"));
//! subscription.dispose();
//! ```

// Re-export the core event model and disposal primitives.
pub use rill_core::{
    Disposable, DisposeBag, EventType, Multicast, Observer, OperationEvent, PublishSubject,
    RawStream, ReplaySubject, SerialDisposable, StreamEvent, SubjectError,
};

// Re-export the stream surface.
pub use rill_stream::{
    Bindable, ConnectableStream, FlattenStrategy, Operation, PushStream, Stream,
};

// Re-export time operators and execution contexts.
pub use rill_stream_time::{
    interval, timer, DebounceExt, DelayExt, ExecuteInExt, ObserveInExt, SampleExt, Scheduler,
    ThrottleExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use rill_core::{Disposable, DisposeBag, Observer, StreamEvent};
    pub use rill_stream::{
        Bindable, ConnectableStream, FlattenStrategy, Operation, PushStream, Stream,
    };
    pub use rill_stream_time::{
        interval, timer, DebounceExt, DelayExt, ExecuteInExt, ObserveInExt, SampleExt, Scheduler,
        ThrottleExt,
    };
}
