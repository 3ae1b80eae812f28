// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame cost of stepping, relayout and easing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::Point;
use sapling_benches::{populated, scrambled_keys};
use sapling_tree::{AnimationConfig, VisualTree};

const FRAME: f64 = 1.0 / 60.0;

fn bench_relayout(c: &mut Criterion) {
    let config = AnimationConfig::default();
    let mut group = c.benchmark_group("relayout_and_ease");
    for n in [15_u32, 127, 1023] {
        let keys = scrambled_keys(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter_batched(
                || populated(keys),
                |mut tree| {
                    tree.update_layout(&config);
                    tree.ease(FRAME, &config);
                    black_box(tree)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_animated_insert(c: &mut Criterion) {
    let config = AnimationConfig::default().with_step_interval(0.0);
    let keys = scrambled_keys(255);
    c.bench_function("animated_insert_255", |b| {
        b.iter(|| {
            let mut tree = VisualTree::with_config(config).unwrap();
            for &k in &keys {
                tree.insert(k, Point::ORIGIN);
                while !tree.is_idle() {
                    black_box(tree.tick(FRAME));
                }
            }
            tree.size()
        });
    });
}

criterion_group!(benches, bench_relayout, bench_animated_insert);
criterion_main!(benches);
