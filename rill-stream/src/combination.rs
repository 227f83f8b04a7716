// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combination operators joining two streams into one.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::{Disposable, DisposeBag, SerialDisposable, StreamEvent};

use crate::stream::Stream;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

struct LatestState<T, U> {
    left: Option<T>,
    right: Option<U>,
    remaining: u8,
}

struct ZipState<T, U> {
    left: VecDeque<T>,
    right: VecDeque<U>,
    left_done: bool,
    right_done: bool,
    completed: bool,
}

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Emits `elements` first, then mirrors `self`.
    pub fn start_with(&self, elements: Vec<T>) -> Stream<T> {
        let source = self.clone();
        let elements = Arc::new(elements);
        Stream::new(move |observer| {
            for element in elements.iter() {
                observer.next(element.clone());
            }
            source.observe_with(observer)
        })
    }

    /// Interleaves elements of both streams as they arrive, completing once
    /// both have completed.
    pub fn merge_with(&self, other: &Stream<T>) -> Stream<T> {
        let left = self.clone();
        let right = other.clone();
        Stream::new(move |observer| {
            let remaining = Arc::new(Mutex::new(2u8));
            let bag = DisposeBag::new();
            for source in [&left, &right] {
                let observer = observer.clone();
                let remaining = Arc::clone(&remaining);
                bag.insert(source.observe(move |event| match event {
                    StreamEvent::Next(element) => observer.next(element),
                    StreamEvent::Completed => {
                        let last = {
                            let mut remaining = remaining.lock();
                            *remaining -= 1;
                            *remaining == 0
                        };
                        if last {
                            observer.completed();
                        }
                    }
                }));
            }
            Disposable::new(move || bag.dispose())
        })
    }

    /// Emits the elements of `self`, then those of `other` once `self` has
    /// completed.
    pub fn concat_with(&self, other: &Stream<T>) -> Stream<T> {
        let first = self.clone();
        let second = other.clone();
        Stream::new(move |observer| {
            let bag = Arc::new(DisposeBag::new());
            let second = second.clone();
            let first_subscription = {
                let bag = Arc::clone(&bag);
                first.observe(move |event| match event {
                    StreamEvent::Next(element) => observer.next(element),
                    StreamEvent::Completed => {
                        bag.insert(second.observe_with(observer.clone()));
                    }
                })
            };
            bag.insert(first_subscription);
            Disposable::new(move || bag.dispose())
        })
    }

    /// Mirrors whichever stream produces an event first; the loser is
    /// disposed and its events discarded.
    pub fn amb_with(&self, other: &Stream<T>) -> Stream<T> {
        let left = self.clone();
        let right = other.clone();
        Stream::new(move |observer| {
            let winner: Arc<Mutex<Option<Side>>> = Arc::new(Mutex::new(None));
            let left_subscription = SerialDisposable::new();
            let right_subscription = SerialDisposable::new();
            for (source, side) in [(&left, Side::Left), (&right, Side::Right)] {
                let observer = observer.clone();
                let winner = Arc::clone(&winner);
                let loser = match side {
                    Side::Left => right_subscription.clone(),
                    Side::Right => left_subscription.clone(),
                };
                let handle = source.observe(move |event| {
                    {
                        let mut winner = winner.lock();
                        match *winner {
                            None => *winner = Some(side),
                            Some(decided) if decided != side => return,
                            Some(_) => {}
                        }
                    }
                    // The race is decided; the other side must stop producing.
                    loser.dispose();
                    observer.on(event);
                });
                match side {
                    Side::Left => left_subscription.set(handle),
                    Side::Right => right_subscription.set(handle),
                }
            }
            Disposable::new(move || {
                left_subscription.dispose();
                right_subscription.dispose();
            })
        })
    }

    /// Pairs the latest element of each stream through `combine` whenever
    /// either side emits; nothing is emitted until both sides have produced
    /// at least one element. Completes once both sides have completed.
    pub fn combine_latest_with<U, R, F>(&self, other: &Stream<U>, combine: F) -> Stream<R>
    where
        U: Clone + Send + Sync + 'static,
        R: Clone + Send + Sync + 'static,
        F: Fn(&T, &U) -> R + Send + Sync + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        let combine = Arc::new(combine);
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(LatestState::<T, U> {
                left: None,
                right: None,
                remaining: 2,
            }));
            let bag = DisposeBag::new();
            let left_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let combine = Arc::clone(&combine);
                left.observe(move |event| match event {
                    StreamEvent::Next(element) => {
                        let combined = {
                            let mut state = state.lock();
                            state.left = Some(element);
                            match (&state.left, &state.right) {
                                (Some(left), Some(right)) => Some(combine(left, right)),
                                _ => None,
                            }
                        };
                        if let Some(combined) = combined {
                            observer.next(combined);
                        }
                    }
                    StreamEvent::Completed => {
                        let last = {
                            let mut state = state.lock();
                            state.remaining -= 1;
                            state.remaining == 0
                        };
                        if last {
                            observer.completed();
                        }
                    }
                })
            };
            bag.insert(left_subscription);
            let right_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let combine = Arc::clone(&combine);
                right.observe(move |event| match event {
                    StreamEvent::Next(element) => {
                        let combined = {
                            let mut state = state.lock();
                            state.right = Some(element);
                            match (&state.left, &state.right) {
                                (Some(left), Some(right)) => Some(combine(left, right)),
                                _ => None,
                            }
                        };
                        if let Some(combined) = combined {
                            observer.next(combined);
                        }
                    }
                    StreamEvent::Completed => {
                        let last = {
                            let mut state = state.lock();
                            state.remaining -= 1;
                            state.remaining == 0
                        };
                        if last {
                            observer.completed();
                        }
                    }
                })
            };
            bag.insert(right_subscription);
            Disposable::new(move || bag.dispose())
        })
    }

    /// Pairs the n-th element of each stream through `combine`. Elements
    /// without a counterpart yet are buffered; completion is propagated once
    /// every pair that can be formed has been emitted.
    pub fn zip_with<U, R, F>(&self, other: &Stream<U>, combine: F) -> Stream<R>
    where
        U: Clone + Send + Sync + 'static,
        R: Clone + Send + Sync + 'static,
        F: Fn(T, U) -> R + Send + Sync + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        let combine = Arc::new(combine);
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(ZipState::<T, U> {
                left: VecDeque::new(),
                right: VecDeque::new(),
                left_done: false,
                right_done: false,
                completed: false,
            }));
            let bag = DisposeBag::new();
            let left_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let combine = Arc::clone(&combine);
                left.observe(move |event| {
                    let (pairs, complete) = {
                        let mut state = state.lock();
                        if state.completed {
                            return;
                        }
                        match event {
                            StreamEvent::Next(element) => state.left.push_back(element),
                            StreamEvent::Completed => state.left_done = true,
                        }
                        drain_pairs(&mut state, combine.as_ref())
                    };
                    for pair in pairs {
                        observer.next(pair);
                    }
                    if complete {
                        observer.completed();
                    }
                })
            };
            bag.insert(left_subscription);
            let right_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let combine = Arc::clone(&combine);
                right.observe(move |event| {
                    let (pairs, complete) = {
                        let mut state = state.lock();
                        if state.completed {
                            return;
                        }
                        match event {
                            StreamEvent::Next(element) => state.right.push_back(element),
                            StreamEvent::Completed => state.right_done = true,
                        }
                        drain_pairs(&mut state, combine.as_ref())
                    };
                    for pair in pairs {
                        observer.next(pair);
                    }
                    if complete {
                        observer.completed();
                    }
                })
            };
            bag.insert(right_subscription);
            Disposable::new(move || bag.dispose())
        })
    }
}

/// Forms as many pairs as both queues allow, then decides whether the zipped
/// stream is exhausted. A side that has completed with an empty queue can
/// never contribute another pair.
fn drain_pairs<T, U, R, F>(state: &mut ZipState<T, U>, combine: &F) -> (Vec<R>, bool)
where
    F: Fn(T, U) -> R,
{
    let mut pairs = Vec::new();
    loop {
        let Some(left) = state.left.pop_front() else { break };
        let Some(right) = state.right.pop_front() else {
            state.left.push_front(left);
            break;
        };
        pairs.push(combine(left, right));
    }
    let exhausted = (state.left_done && state.left.is_empty())
        || (state.right_done && state.right.is_empty());
    if exhausted {
        state.completed = true;
    }
    (pairs, exhausted)
}
