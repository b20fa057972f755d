//! Benchmarks for bottom-up and top-down reconciliation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hierarchy_forecast::hierarchy::{AveProportions, PropAverages, Reconciler};
use polars::prelude::*;

const STATES: [&str; 3] = ["CA", "TX", "WI"];
const CATS: [&str; 3] = ["FOODS", "HOBBIES", "HOUSEHOLD"];

/// Item/store frame with `days` numeric columns named `{prefix}{day}`.
fn generate_items(n_items: usize, days: usize, prefix: &str) -> DataFrame {
    let rows = n_items * STATES.len();
    let item_ids: Vec<String> = (0..rows)
        .map(|r| format!("{}_{:03}", CATS[r % 3], r / 3))
        .collect();
    let cat_ids: Vec<&str> = (0..rows).map(|r| CATS[(r / 3) % 3]).collect();
    let state_ids: Vec<&str> = (0..rows).map(|r| STATES[r % 3]).collect();
    let store_ids: Vec<String> = (0..rows).map(|r| format!("{}_1", STATES[r % 3])).collect();

    let mut columns = vec![
        Column::new("item_id".into(), item_ids),
        Column::new("cat_id".into(), cat_ids),
        Column::new("state_id".into(), state_ids),
        Column::new("store_id".into(), store_ids),
    ];
    for d in 1..=days {
        let sales: Vec<f64> = (0..rows).map(|r| ((r * 7 + d * 3) % 11) as f64).collect();
        columns.push(Column::new(format!("{prefix}{d}").into(), sales));
    }
    DataFrame::new(columns).unwrap()
}

fn bench_bottom_up(c: &mut Criterion) {
    let mut group = c.benchmark_group("bottom_up");
    let reconciler = Reconciler::default();

    for n_items in [100, 1000].iter() {
        let forecasts = generate_items(*n_items, 28, "F");

        for level in ["Level1", "Level6", "Level12"] {
            group.bench_with_input(BenchmarkId::new(level, n_items), n_items, |b, _| {
                b.iter(|| reconciler.bottom_up(level, black_box(&forecasts)))
            });
        }
    }

    group.finish();
}

fn bench_top_down(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_down");
    let reconciler = Reconciler::default();
    let total = generate_items(1, 28, "F").select(["F1", "F2", "F3"]).unwrap();

    for n_items in [100, 1000].iter() {
        let reference = generate_items(*n_items, 28, "d_");

        group.bench_with_input(BenchmarkId::new("prop_averages", n_items), n_items, |b, _| {
            let estimator = PropAverages::new(&reference, 28);
            b.iter(|| reconciler.top_down("Level12", black_box(&total), &estimator))
        });

        group.bench_with_input(BenchmarkId::new("ave_proportions", n_items), n_items, |b, _| {
            let estimator = AveProportions::new(&reference, 28);
            b.iter(|| reconciler.top_down("Level12", black_box(&total), &estimator))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bottom_up, bench_top_down);
criterion_main!(benches);
