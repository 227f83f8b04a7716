// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core building blocks for rill's push-based streams.
//!
//! Leaves-first: [`Disposable`] is the cancellation capability, [`StreamEvent`]
//! is the `Next* Completed` event algebra, [`Observer`] is the sink, and
//! [`RawStream`] is the cold producer core everything else composes on.
//! Multicast hubs ([`PublishSubject`], [`ReplaySubject`]) live here as well
//! because the connectable machinery in `rill-stream` is generic over them
//! through the [`Multicast`] trait.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod dispose_bag;
pub mod disposable;
pub mod event_type;
pub mod multicast;
pub mod observer;
pub mod operation_event;
pub mod publish_subject;
pub mod raw_stream;
pub mod replay_subject;
pub mod serial_disposable;
pub mod stream_event;
pub mod subject_error;

pub use self::dispose_bag::DisposeBag;
pub use self::disposable::Disposable;
pub use self::event_type::EventType;
pub use self::multicast::Multicast;
pub use self::observer::Observer;
pub use self::operation_event::OperationEvent;
pub use self::publish_subject::PublishSubject;
pub use self::raw_stream::RawStream;
pub use self::replay_subject::ReplaySubject;
pub use self::serial_disposable::SerialDisposable;
pub use self::stream_event::StreamEvent;
pub use self::subject_error::SubjectError;
