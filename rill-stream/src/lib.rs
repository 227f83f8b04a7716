// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The typed stream surface: [`Stream<T>`] plus its operator library,
//! connectable/multicast variants, the externally drivable [`PushStream`],
//! the [`Bindable`] one-way binding contract, and the fallible
//! [`Operation`] variant.
//!
//! Operators are grouped the way the surface reads: transformation,
//! filtration, combination, flattening. Time-based operators live in
//! `rill-stream-time`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod bindable;
pub mod combination;
pub mod connectable;
pub mod filtration;
pub mod flatten;
pub mod operation;
pub mod push_stream;
pub mod stream;
pub mod transforming;

pub use self::bindable::Bindable;
pub use self::connectable::ConnectableStream;
pub use self::flatten::FlattenStrategy;
pub use self::operation::Operation;
pub use self::push_stream::PushStream;
pub use self::stream::Stream;

pub use rill_core::{
    Disposable, DisposeBag, EventType, Multicast, Observer, OperationEvent, PublishSubject,
    RawStream, ReplaySubject, SerialDisposable, StreamEvent, SubjectError,
};
