//! Benchmarks for compaction, synchronization and breakpoint transitions.
//!
//! Run with: cargo bench -p responsive-grid

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use responsive_grid::{
    CompactType, GridItem, Layout, LayoutsByBreakpoint, ResponsiveConfig, compact, initialize,
    live_items, on_config_change, synchronize,
};
use std::hint::black_box;

/// A scattered layout of `n` items on a 12-column grid.
fn make_layout(n: usize) -> Layout {
    (0..n)
        .map(|i| {
            let i = i as u32;
            GridItem::new(format!("i{i}"), (i * 5) % 12, (i * 7) % 40, 1 + i % 4, 1 + i % 3)
        })
        .collect()
}

fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/compact");
    for n in [10, 50, 200] {
        let layout = make_layout(n);
        for compact_type in [CompactType::Vertical, CompactType::Horizontal] {
            group.bench_with_input(
                BenchmarkId::new(compact_type.to_string(), n),
                &layout,
                |b, layout| b.iter(|| black_box(compact(layout, compact_type, 12))),
            );
        }
    }
    group.finish();
}

fn bench_synchronize(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/synchronize");
    for n in [10, 50, 200] {
        let layout = make_layout(n);
        // Drop every third item and add as many new ones.
        let ids: Vec<String> = (0..n)
            .filter(|i| i % 3 != 0)
            .map(|i| format!("i{i}"))
            .chain((0..n / 3).map(|i| format!("new{i}")))
            .collect();
        let live = live_items(ids);
        group.bench_with_input(BenchmarkId::new("vertical", n), &layout, |b, layout| {
            b.iter(|| black_box(synchronize(layout, &live, 12, CompactType::Vertical)))
        });
    }
    group.finish();
}

fn bench_breakpoint_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/transition");
    for n in [10, 50] {
        let ids: Vec<String> = (0..n).map(|i| format!("i{i}")).collect();
        let prev = ResponsiveConfig::default()
            .with_width(1300)
            .with_layouts(LayoutsByBreakpoint::from([("lg".to_string(), make_layout(n))]))
            .with_items(live_items(ids));
        let next = prev.clone().with_width(900);
        let Ok(init) = initialize(&prev) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("lg_to_sm", n), &init.state, |b, state| {
            b.iter(|| black_box(on_config_change(&prev, &next, state)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compact,
    bench_synchronize,
    bench_breakpoint_transition
);
criterion_main!(benches);
