// Copyright 2025 The Rill Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use rill_stream::Stream;

/// Benchmarks positional pairing, which buffers the whole left side before
/// the right side is subscribed.
pub fn bench_zip(c: &mut Criterion) {
    let mut group = c.benchmark_group("zip");
    let sizes = [100usize, 1_000, 10_000];

    for &size in &sizes {
        let id = BenchmarkId::from_parameter(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(id, &size, |bencher, &size| {
            let left = Stream::sequence(0..size as u64);
            let right = Stream::sequence(0..size as u64);
            let pipeline = left.zip_with(&right, |a, b| a + b);
            bencher.iter(|| {
                pipeline
                    .observe(|event| {
                        black_box(&event);
                    })
                    .dispose();
            });
        });
    }

    group.finish();
}
