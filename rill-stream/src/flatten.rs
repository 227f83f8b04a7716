// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattening of streams of streams, in three propagation disciplines.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rill_core::{Disposable, DisposeBag, Observer, SerialDisposable, StreamEvent};

use crate::stream::Stream;

/// How a stream of streams folds its inner streams into one output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlattenStrategy {
    /// Subscribe to every inner stream as it arrives and interleave their
    /// elements.
    Merge,
    /// Subscribe to inner streams one at a time, in arrival order, each only
    /// after its predecessor completed.
    Concat,
    /// Subscribe only to the most recent inner stream, dropping the previous
    /// subscription when a new inner stream arrives.
    Latest,
}

struct MergeState {
    active_inners: usize,
    outer_done: bool,
    completed: bool,
}

struct ConcatState<T> {
    pending: VecDeque<Stream<T>>,
    inner_active: bool,
    outer_done: bool,
    driving: bool,
    completed: bool,
}

struct SwitchState {
    generation: u64,
    inner_active: bool,
    outer_done: bool,
}

impl<T: Clone + Send + Sync + 'static> Stream<Stream<T>> {
    /// Flattens with the given [`FlattenStrategy`].
    pub fn flatten(&self, strategy: FlattenStrategy) -> Stream<T> {
        match strategy {
            FlattenStrategy::Merge => self.merge(),
            FlattenStrategy::Concat => self.concat(),
            FlattenStrategy::Latest => self.switch_to_latest(),
        }
    }

    /// Interleaves the elements of all inner streams. Completes once the
    /// outer stream and every inner stream have completed.
    pub fn merge(&self) -> Stream<T> {
        let outer = self.clone();
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(MergeState {
                active_inners: 0,
                outer_done: false,
                completed: false,
            }));
            let bag = Arc::new(DisposeBag::new());
            let outer_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let bag = Arc::clone(&bag);
                outer.observe(move |event| match event {
                    StreamEvent::Next(inner) => {
                        state.lock().active_inners += 1;
                        let inner_subscription = {
                            let observer = observer.clone();
                            let state = Arc::clone(&state);
                            inner.observe(move |event| match event {
                                StreamEvent::Next(element) => observer.next(element),
                                StreamEvent::Completed => {
                                    let last = {
                                        let mut state = state.lock();
                                        state.active_inners -= 1;
                                        let last = state.active_inners == 0
                                            && state.outer_done
                                            && !state.completed;
                                        if last {
                                            state.completed = true;
                                        }
                                        last
                                    };
                                    if last {
                                        observer.completed();
                                    }
                                }
                            })
                        };
                        bag.insert(inner_subscription);
                    }
                    StreamEvent::Completed => {
                        let last = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            let last = state.active_inners == 0 && !state.completed;
                            if last {
                                state.completed = true;
                            }
                            last
                        };
                        if last {
                            observer.completed();
                        }
                    }
                })
            };
            bag.insert(outer_subscription);
            Disposable::new(move || bag.dispose())
        })
    }

    /// Replays inner streams back to back, in arrival order. An inner stream
    /// is subscribed only after its predecessor completed; inner streams that
    /// arrive in the meantime are queued.
    pub fn concat(&self) -> Stream<T> {
        let outer = self.clone();
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(ConcatState::<T> {
                pending: VecDeque::new(),
                inner_active: false,
                outer_done: false,
                driving: false,
                completed: false,
            }));
            let bag = Arc::new(DisposeBag::new());
            let outer_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let bag = Arc::clone(&bag);
                outer.observe(move |event| {
                    match event {
                        StreamEvent::Next(inner) => state.lock().pending.push_back(inner),
                        StreamEvent::Completed => state.lock().outer_done = true,
                    }
                    drive_concat(&state, &observer, &bag);
                })
            };
            bag.insert(outer_subscription);
            Disposable::new(move || bag.dispose())
        })
    }

    /// Mirrors only the most recent inner stream. A newly arriving inner
    /// stream replaces, and disposes, the subscription to the previous one.
    pub fn switch_to_latest(&self) -> Stream<T> {
        let outer = self.clone();
        Stream::new(move |observer| {
            let state = Arc::new(Mutex::new(SwitchState {
                generation: 0,
                inner_active: false,
                outer_done: false,
            }));
            let current = SerialDisposable::new();
            let outer_subscription = {
                let observer = observer.clone();
                let state = Arc::clone(&state);
                let current = current.clone();
                outer.observe(move |event| match event {
                    StreamEvent::Next(inner) => {
                        let my_generation = {
                            let mut state = state.lock();
                            state.generation += 1;
                            state.inner_active = true;
                            state.generation
                        };
                        let inner_subscription = {
                            let observer = observer.clone();
                            let state = Arc::clone(&state);
                            inner.observe(move |event| {
                                let forward = {
                                    let mut state = state.lock();
                                    if state.generation != my_generation {
                                        return;
                                    }
                                    match &event {
                                        StreamEvent::Next(_) => true,
                                        StreamEvent::Completed => {
                                            state.inner_active = false;
                                            state.outer_done
                                        }
                                    }
                                };
                                if forward {
                                    observer.on(event);
                                }
                            })
                        };
                        current.set(inner_subscription);
                    }
                    StreamEvent::Completed => {
                        let finish = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            !state.inner_active
                        };
                        if finish {
                            observer.completed();
                        }
                    }
                })
            };
            let current = current.clone();
            Disposable::new(move || {
                outer_subscription.dispose();
                current.dispose();
            })
        })
    }
}

/// Advances the concat machine: subscribes queued inner streams one at a
/// time, iteratively rather than recursively, so that a chain of inner
/// streams completing synchronously does not grow the call stack.
fn drive_concat<T: Clone + Send + Sync + 'static>(
    state: &Arc<Mutex<ConcatState<T>>>,
    observer: &Observer<StreamEvent<T>>,
    bag: &Arc<DisposeBag>,
) {
    {
        let mut state = state.lock();
        if state.driving {
            return;
        }
        state.driving = true;
    }
    loop {
        let next = {
            let mut locked = state.lock();
            if locked.inner_active || locked.completed {
                locked.driving = false;
                return;
            }
            match locked.pending.pop_front() {
                Some(inner) => {
                    locked.inner_active = true;
                    Some(inner)
                }
                None if locked.outer_done => {
                    locked.completed = true;
                    locked.driving = false;
                    None
                }
                None => {
                    locked.driving = false;
                    return;
                }
            }
        };
        let Some(inner) = next else {
            observer.completed();
            return;
        };
        let inner_subscription = {
            let observer = observer.clone();
            let state = Arc::clone(state);
            let bag = Arc::clone(bag);
            inner.observe(move |event| match event {
                StreamEvent::Next(element) => observer.next(element),
                StreamEvent::Completed => {
                    state.lock().inner_active = false;
                    drive_concat(&state, &observer, &bag);
                }
            })
        };
        bag.insert(inner_subscription);
    }
}

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// Maps each element to a stream and flattens the result with the given
    /// strategy.
    pub fn flat_map<U, F>(&self, strategy: FlattenStrategy, transform: F) -> Stream<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Stream<U> + Send + Sync + 'static,
    {
        self.map(transform).flatten(strategy)
    }
}
