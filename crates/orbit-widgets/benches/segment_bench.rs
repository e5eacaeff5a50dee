//! Benchmarks for building and painting render-tree rows.
//!
//! Run with: cargo bench -p orbit-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use orbit_core::geometry::Padding;
use orbit_render::{RenderCaps, RenderTarget};
use orbit_style::{ConsoleColor, TextStyle};
use orbit_widgets::Renderable;
use std::hint::black_box;

fn status_table(rows: usize) -> Renderable {
    (0..rows)
        .map(|i| {
            Renderable::text(&format!("repo-{i:03}"))
                .boxed(Padding::horizontal(1))
                .add_right(Renderable::styled(
                    "building release artifacts",
                    TextStyle::fore(ConsoleColor::Cyan),
                ))
        })
        .fold(Renderable::empty(), Renderable::add_below)
}

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint_rows");
    for rows in [10usize, 100] {
        let tree = status_table(rows);
        for caps in [("plain", RenderCaps::PLAIN), ("ansi", RenderCaps::ANSI)] {
            group.bench_with_input(
                BenchmarkId::new(caps.0, rows),
                &tree,
                |b, tree| {
                    b.iter(|| {
                        let mut target = RenderTarget::new(Vec::with_capacity(8192), caps.1);
                        for row in 0..tree.height() {
                            tree.paint_row(row, 80, &mut target);
                            target.new_line();
                        }
                        black_box(target.into_inner())
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_reflow(c: &mut Criterion) {
    let tree = status_table(50);
    c.bench_function("fit_to_width_50x30", |b| {
        b.iter(|| black_box(black_box(&tree).fit_to_width(30)))
    });
}

criterion_group!(benches, bench_paint, bench_reflow);
criterion_main!(benches);
