// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Errors returned by the checked subject entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject has already received its terminal event; no further
    /// events can be accepted without violating the `Next* Completed`
    /// grammar.
    #[error("subject already received its terminal event")]
    Completed,
}
