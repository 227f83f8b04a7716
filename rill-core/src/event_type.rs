// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// The single parametrized interface over stream-like event unions.
///
/// [`StreamEvent<T>`](crate::StreamEvent) is the failure-free two-case
/// algebra; [`OperationEvent<T, E>`](crate::OperationEvent) adds a `Failed`
/// variant for flows that carry a distinguishable failure channel. Both plug
/// into the same [`RawStream`](crate::RawStream) producer core.
pub trait EventType: Send + Sized + 'static {
    /// The type of elements carried by non-terminal events.
    type Element: Send + 'static;

    /// Constructs a non-terminal event carrying `element`.
    fn next(element: Self::Element) -> Self;

    /// Constructs the completion event.
    fn completed() -> Self;

    /// The element of a non-terminal event.
    fn element(&self) -> Option<&Self::Element>;

    /// Consumes the event, returning the element of a non-terminal event.
    fn into_element(self) -> Option<Self::Element>;

    /// `true` for events that terminate the sequence. No further events may
    /// be delivered to an observer after a terminal one.
    fn is_terminal(&self) -> bool;
}
