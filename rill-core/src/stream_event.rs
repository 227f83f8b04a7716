// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::event_type::EventType;

/// An event produced by a stream.
///
/// Well-formed streams follow the grammar `Next* Completed`: zero or more
/// elements followed by at most one completion. Once a `Completed` has been
/// delivered to an observer, no further events may reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent<T> {
    /// Carries an element.
    Next(T),
    /// The stream is completed.
    Completed,
}

impl<T> StreamEvent<T> {
    /// The element of a non-terminal (`Next`) event.
    pub fn element(&self) -> Option<&T> {
        match self {
            StreamEvent::Next(element) => Some(element),
            StreamEvent::Completed => None,
        }
    }

    /// Consumes the event, returning the element of a `Next` event.
    pub fn into_element(self) -> Option<T> {
        match self {
            StreamEvent::Next(element) => Some(element),
            StreamEvent::Completed => None,
        }
    }

    /// `true` if the event marks completion of the stream.
    pub const fn is_completion(&self) -> bool {
        matches!(self, StreamEvent::Completed)
    }

    /// Maps the element of a `Next` event; `Completed` passes through.
    pub fn map<U, F>(self, transform: F) -> StreamEvent<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            StreamEvent::Next(element) => StreamEvent::Next(transform(element)),
            StreamEvent::Completed => StreamEvent::Completed,
        }
    }
}

impl<T: Send + 'static> EventType for StreamEvent<T> {
    type Element = T;

    fn next(element: T) -> Self {
        StreamEvent::Next(element)
    }

    fn completed() -> Self {
        StreamEvent::Completed
    }

    fn element(&self) -> Option<&T> {
        StreamEvent::element(self)
    }

    fn into_element(self) -> Option<T> {
        StreamEvent::into_element(self)
    }

    fn is_terminal(&self) -> bool {
        self.is_completion()
    }
}
