// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

struct Inner {
    disposed: AtomicBool,
    teardown: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

/// A cancellation handle for a subscription or composite resource.
///
/// Disposing is idempotent: the teardown action runs exactly once across all
/// clones of the handle, on the first `dispose` call. Each subscription owns
/// exactly one disposable; the subscriber decides when to release it.
pub struct Disposable {
    inner: Arc<Inner>,
}

impl Clone for Disposable {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Disposable {
    /// A disposable that runs `teardown` exactly once when first disposed.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                teardown: Mutex::new(Some(Box::new(teardown))),
            }),
        }
    }

    /// A disposable with no associated resource. Disposing it only flips the
    /// `is_disposed` flag.
    pub fn noop() -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                teardown: Mutex::new(None),
            }),
        }
    }

    /// Releases the associated resource. Safe to call multiple times; only
    /// the first call has effect.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let teardown = self.inner.teardown.lock().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// `true` once `dispose` has been called on any clone of this handle.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
