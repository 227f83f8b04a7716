// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::disposable::Disposable;

/// Owns a collection of disposables and disposes them all exactly once,
/// either explicitly or when the bag is dropped.
///
/// Inserting into an already-disposed bag disposes the incoming disposable
/// immediately.
pub struct DisposeBag {
    disposed: AtomicBool,
    items: Mutex<Vec<Disposable>>,
}

impl DisposeBag {
    /// An empty bag.
    pub fn new() -> Self {
        Self {
            disposed: AtomicBool::new(false),
            items: Mutex::new(Vec::new()),
        }
    }

    /// Adds a disposable to the bag.
    pub fn insert(&self, disposable: Disposable) {
        if self.disposed.load(Ordering::Acquire) {
            disposable.dispose();
            return;
        }
        let mut items = self.items.lock();
        // Re-check under the lock so a racing dispose cannot strand us.
        if self.disposed.load(Ordering::Acquire) {
            drop(items);
            disposable.dispose();
            return;
        }
        items.push(disposable);
    }

    /// Disposes every disposable in the bag.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let drained: Vec<Disposable> = std::mem::take(&mut *self.items.lock());
        for disposable in drained {
            disposable.dispose();
        }
    }

    /// `true` once the bag has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Number of disposables currently held.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// `true` if the bag holds no disposables.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl Default for DisposeBag {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeBag")
            .field("disposed", &self.is_disposed())
            .field("len", &self.len())
            .finish()
    }
}
