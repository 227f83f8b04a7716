// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtration operators: predicates, positional filters and duplicate
//! suppression.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::{Disposable, SerialDisposable, StreamEvent};

use crate::stream::Stream;

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Emits only elements that pass the `include` test; `Completed` always
    /// passes through.
    pub fn filter<F>(&self, include: F) -> Stream<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let include = Arc::new(include);
        Stream::new(move |observer| {
            let include = Arc::clone(&include);
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    if include(&element) {
                        observer.next(element);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Emits the first element and then every element not equal (by
    /// `are_equal`) to the immediately preceding emitted element.
    pub fn distinct_by<F>(&self, are_equal: F) -> Stream<T>
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let are_equal = Arc::new(are_equal);
        Stream::new(move |observer| {
            let previous: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
            let are_equal = Arc::clone(&are_equal);
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let emit = {
                        let mut previous = previous.lock();
                        let changed = match previous.as_ref() {
                            None => true,
                            Some(previous) => !are_equal(previous, &element),
                        };
                        if changed {
                            *previous = Some(element.clone());
                        }
                        changed
                    };
                    if emit {
                        observer.next(element);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Emits the first element and then all elements not equal to their
    /// predecessor.
    pub fn distinct(&self) -> Stream<T>
    where
        T: PartialEq,
    {
        self.distinct_by(|previous, current| previous == current)
    }

    /// Emits only the element at `index` and then completes, cancelling the
    /// upstream subscription. The upstream completing before `index` is
    /// reached violates the operator's precondition; it is reported and the
    /// resulting stream completes empty.
    pub fn element_at(&self, index: usize) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let upstream = SerialDisposable::new();
            let seen = Arc::new(Mutex::new(0usize));
            let done = Arc::new(AtomicBool::new(false));
            let subscription = {
                let upstream = upstream.clone();
                let done = Arc::clone(&done);
                source.observe(move |event| match event {
                    StreamEvent::Next(element) => {
                        if done.load(Ordering::Acquire) {
                            return;
                        }
                        let reached = {
                            let mut seen = seen.lock();
                            let reached = *seen == index;
                            *seen += 1;
                            reached
                        };
                        if reached {
                            done.store(true, Ordering::Release);
                            observer.next(element);
                            observer.completed();
                            upstream.dispose();
                        }
                    }
                    StreamEvent::Completed => {
                        if done.swap(true, Ordering::AcqRel) {
                            return;
                        }
                        tracing::error!(index, "stream completed before reaching requested element");
                        debug_assert!(false, "element_at index out of range");
                        observer.completed();
                    }
                })
            };
            upstream.set(subscription);
            upstream.as_disposable()
        })
    }

    /// Emits only the first element and then completes.
    pub fn first(&self) -> Stream<T> {
        self.take(1)
    }

    /// Emits only the last element, at completion.
    pub fn last(&self) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let latest: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    *latest.lock() = Some(element);
                }
                StreamEvent::Completed => {
                    let final_element = latest.lock().take();
                    if let Some(element) = final_element {
                        observer.next(element);
                    }
                    observer.completed();
                }
            })
        })
    }

    /// Ignores all elements, propagating only completion.
    pub fn ignore_elements(&self) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            source.observe(move |event| {
                if event.is_completion() {
                    observer.completed();
                }
            })
        })
    }

    /// Suppresses the first `count` elements.
    pub fn skip(&self, count: usize) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let skipped = Arc::new(Mutex::new(0usize));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let forward = {
                        let mut skipped = skipped.lock();
                        if *skipped < count {
                            *skipped += 1;
                            false
                        } else {
                            true
                        }
                    };
                    if forward {
                        observer.next(element);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Suppresses the last `count` elements.
    pub fn skip_last(&self, count: usize) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let held: Arc<Mutex<VecDeque<T>>> = Arc::new(Mutex::new(VecDeque::new()));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let release = {
                        let mut held = held.lock();
                        held.push_back(element);
                        if held.len() > count {
                            held.pop_front()
                        } else {
                            None
                        }
                    };
                    if let Some(element) = release {
                        observer.next(element);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            })
        })
    }

    /// Emits only the first `count` elements and then completes, cancelling
    /// the upstream subscription no later than the completion.
    pub fn take(&self, count: usize) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            if count == 0 {
                observer.completed();
                return Disposable::noop();
            }
            let upstream = SerialDisposable::new();
            let taken = Arc::new(Mutex::new(0usize));
            let done = Arc::new(AtomicBool::new(false));
            let subscription = {
                let upstream = upstream.clone();
                let done = Arc::clone(&done);
                source.observe(move |event| match event {
                    StreamEvent::Next(element) => {
                        let reached = {
                            let mut taken = taken.lock();
                            if *taken >= count {
                                return;
                            }
                            *taken += 1;
                            *taken == count
                        };
                        observer.next(element);
                        if reached {
                            done.store(true, Ordering::Release);
                            observer.completed();
                            upstream.dispose();
                        }
                    }
                    StreamEvent::Completed => {
                        if !done.swap(true, Ordering::AcqRel) {
                            observer.completed();
                        }
                    }
                })
            };
            upstream.set(subscription);
            upstream.as_disposable()
        })
    }

    /// Emits only the last `count` elements, at completion.
    pub fn take_last(&self, count: usize) -> Stream<T> {
        let source = self.clone();
        Stream::new(move |observer| {
            let held: Arc<Mutex<VecDeque<T>>> = Arc::new(Mutex::new(VecDeque::new()));
            source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    let mut held = held.lock();
                    held.push_back(element);
                    if held.len() > count {
                        held.pop_front();
                    }
                }
                StreamEvent::Completed => {
                    let drained: Vec<T> = held.lock().drain(..).collect();
                    for element in drained {
                        observer.next(element);
                    }
                    observer.completed();
                }
            })
        })
    }

    /// Suppresses elements while the latest element of `gate` is `false`.
    /// The gate starts open; completion of `gate` leaves the latest verdict
    /// in place.
    pub fn pausable(&self, gate: &Stream<bool>) -> Stream<T> {
        let source = self.clone();
        let gate = gate.clone();
        Stream::new(move |observer| {
            let open = Arc::new(Mutex::new(true));
            let gate_subscription = {
                let open = Arc::clone(&open);
                gate.observe(move |event| {
                    if let StreamEvent::Next(verdict) = event {
                        *open.lock() = verdict;
                    }
                })
            };
            let source_subscription = source.observe(move |event| match event {
                StreamEvent::Next(element) => {
                    if *open.lock() {
                        observer.next(element);
                    }
                }
                StreamEvent::Completed => observer.completed(),
            });
            Disposable::new(move || {
                source_subscription.dispose();
                gate_subscription.dispose();
            })
        })
    }
}
