// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rill_core::{Disposable, Observer, SerialDisposable, StreamEvent};

use crate::stream::Stream;

/// A sink a stream can be bound to.
///
/// A bindable hands out an observer and takes ownership of the `disconnect`
/// handle, tying the binding's lifetime to its own: when the bindable goes
/// away it disposes the handle and the feeding subscription stops.
pub trait Bindable {
    type Element: Clone + Send + Sync + 'static;

    /// An observer feeding this target. `disconnect` severs the binding; the
    /// implementer keeps it and disposes it when the target is done
    /// receiving.
    fn observer(&self, disconnect: Disposable) -> Observer<StreamEvent<Self::Element>>;
}

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Feeds this stream's events into `target` until either side ends the
    /// binding.
    ///
    /// The binding is severed by disposing the returned handle, by the target
    /// disposing the handle it was given, or by this stream completing.
    pub fn bind_to<B>(&self, target: &B) -> Disposable
    where
        B: Bindable<Element = T>,
    {
        // The target receives its disconnect handle before the subscription
        // exists; the serial makes disposing it early still take effect.
        let serial = SerialDisposable::new();
        let observer = target.observer(serial.as_disposable());
        let subscription = self.observe_with(observer);
        serial.set(subscription);
        serial.as_disposable()
    }
}
