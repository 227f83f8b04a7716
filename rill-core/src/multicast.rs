// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::disposable::Disposable;
use crate::observer::Observer;

/// A hub that fans pushed events out to a set of attached observers.
///
/// This is the seam between the subjects in this crate and the connectable
/// stream machinery in `rill-stream`, which is generic over the hub so
/// `publish()` and `replay()` share one implementation.
pub trait Multicast<E>: Send + Sync {
    /// Delivers `event` to every currently attached observer, in attachment
    /// order.
    fn push(&self, event: E);

    /// Registers an observer. The returned disposable detaches it.
    fn attach(&self, observer: Observer<E>) -> Disposable;
}
