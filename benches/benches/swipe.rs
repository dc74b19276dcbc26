// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use std::rc::Rc;
use understory_swipe::{
    ActionGroup, ActionItem, ManualScheduler, RowConfig, RowCoordinator, SharedActiveRow, Side,
    SwipeContext, SwipeController, SwipeSettings,
};

type Row = SwipeController<u32, u32>;

fn context() -> (SwipeContext<u32>, Rc<SharedActiveRow<u32>>) {
    let active = Rc::new(SharedActiveRow::new());
    let ctx = SwipeContext::new(active.clone(), Rc::new(ManualScheduler::new()), Rc::new(()));
    (ctx, active)
}

fn row(id: u32, ctx: &SwipeContext<u32>) -> Row {
    let config = RowConfig::new(id, 375.0)
        .with_leading(ActionGroup::new([ActionItem::new(0, (), 75.0, || {})]))
        .with_trailing(ActionGroup::new([
            ActionItem::new(1, (), 75.0, || {}),
            ActionItem::new(2, (), 90.0, || {}).destructive(),
        ]))
        .with_settings(SwipeSettings::new(80.0).with_swipe_out_trigger_value(200.0));
    SwipeController::new(config, ctx.clone()).unwrap()
}

fn bench_drag_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe/drag_stream");

    // One update per frame; long streams model slow, hesitant drags.
    for updates in [16usize, 120, 960] {
        let deltas: Vec<f64> = (0..updates)
            .map(|i| -250.0 * (i as f64 / updates as f64))
            .collect();
        group.throughput(Throughput::Elements(updates as u64));

        group.bench_with_input(BenchmarkId::new("track", updates), &deltas, |b, deltas| {
            let (ctx, _active) = context();
            b.iter_batched(
                || row(1, &ctx),
                |mut row| {
                    for &dx in deltas {
                        row.on_drag_change(dx);
                        black_box(row.item_display_width(Side::Trailing, 1));
                    }
                    row.on_drag_end();
                    black_box(row.drain_events());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_coordinator_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe/coordinator_sync");

    // Every sync after a claim visits all rows; only the locked one does real work.
    for len in [16usize, 128, 1_024] {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_function(BenchmarkId::new("claim_and_close", len), |b| {
            b.iter_batched(
                || {
                    let (ctx, active) = context();
                    let mut rows: Vec<Row> = (0..len as u32).map(|id| row(id, &ctx)).collect();
                    rows[0].lock_open(Side::Leading);
                    let mut coordinator = RowCoordinator::new();
                    coordinator.sync(&active, rows.iter_mut());
                    (rows, active, coordinator)
                },
                |(mut rows, active, mut coordinator)| {
                    let last = rows.len() - 1;
                    rows[last].on_drag_change(-40.0);
                    black_box(coordinator.sync(&active, rows.iter_mut()));
                    black_box(rows);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_drag_stream, bench_coordinator_sync);
criterion_main!(benches);
