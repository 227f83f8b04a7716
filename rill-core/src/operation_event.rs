// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::event_type::EventType;

/// The three-case event union for flows with a failure channel.
///
/// Grammar: `Next* (Failed | Completed)` — both `Failed` and `Completed` are
/// terminal. The plain [`StreamEvent`](crate::StreamEvent) algebra stays
/// failure-free by construction; collaborators with fallible sources route
/// them through this union instead (see `Operation` in `rill-stream`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationEvent<T, E> {
    /// Carries an element.
    Next(T),
    /// The operation failed; terminates the sequence.
    Failed(E),
    /// The operation completed successfully.
    Completed,
}

impl<T, E> OperationEvent<T, E> {
    /// `true` if the event marks failure.
    pub const fn is_failure(&self) -> bool {
        matches!(self, OperationEvent::Failed(_))
    }

    /// The error of a `Failed` event.
    pub fn failure(&self) -> Option<&E> {
        match self {
            OperationEvent::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Maps the element of a `Next` event; terminal events pass through.
    pub fn map<U, F>(self, transform: F) -> OperationEvent<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OperationEvent::Next(element) => OperationEvent::Next(transform(element)),
            OperationEvent::Failed(error) => OperationEvent::Failed(error),
            OperationEvent::Completed => OperationEvent::Completed,
        }
    }

    /// Maps the error of a `Failed` event; other events pass through.
    pub fn map_failure<F2, F>(self, transform: F) -> OperationEvent<T, F2>
    where
        F: FnOnce(E) -> F2,
    {
        match self {
            OperationEvent::Next(element) => OperationEvent::Next(element),
            OperationEvent::Failed(error) => OperationEvent::Failed(transform(error)),
            OperationEvent::Completed => OperationEvent::Completed,
        }
    }
}

impl<T, E> EventType for OperationEvent<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Element = T;

    fn next(element: T) -> Self {
        OperationEvent::Next(element)
    }

    fn completed() -> Self {
        OperationEvent::Completed
    }

    fn element(&self) -> Option<&T> {
        match self {
            OperationEvent::Next(element) => Some(element),
            _ => None,
        }
    }

    fn into_element(self) -> Option<T> {
        match self {
            OperationEvent::Next(element) => Some(element),
            _ => None,
        }
    }

    fn is_terminal(&self) -> bool {
        !matches!(self, OperationEvent::Next(_))
    }
}
