// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::disposable::Disposable;

struct SerialState {
    disposed: bool,
    current: Option<Disposable>,
}

/// A disposable holding at most one inner disposable at a time.
///
/// `set` swaps the held disposable atomically, disposing exactly the one it
/// replaces — never a stale one. Setting after the serial itself has been
/// disposed immediately disposes the incoming disposable, so no resource
/// leaks past the cancellation point.
pub struct SerialDisposable {
    state: Arc<Mutex<SerialState>>,
}

impl Clone for SerialDisposable {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl SerialDisposable {
    /// An empty serial disposable.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SerialState {
                disposed: false,
                current: None,
            })),
        }
    }

    /// Replaces the held disposable, disposing the previous one.
    pub fn set(&self, disposable: Disposable) {
        let mut state = self.state.lock();
        if state.disposed {
            drop(state);
            disposable.dispose();
            return;
        }
        let replaced = state.current.replace(disposable);
        drop(state);
        if let Some(previous) = replaced {
            previous.dispose();
        }
    }

    /// Disposes the currently held disposable and marks the serial disposed.
    pub fn dispose(&self) {
        let current = {
            let mut state = self.state.lock();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.current.take()
        };
        if let Some(current) = current {
            current.dispose();
        }
    }

    /// `true` once the serial has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }

    /// A plain [`Disposable`] handle that disposes this serial.
    pub fn as_disposable(&self) -> Disposable {
        let serial = self.clone();
        Disposable::new(move || serial.dispose())
    }
}

impl Default for SerialDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SerialDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
