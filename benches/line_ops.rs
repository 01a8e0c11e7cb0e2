//! Benchmarks for the line-editing hot path.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use linekeys::editor::{MoveDirection, locate, move_line};
use linekeys::surface::Selection;

fn large_buffer() -> String {
    "the quick brown fox jumps over the lazy dog\n".repeat(500)
}

fn bench_locate(c: &mut Criterion) {
    let text = large_buffer();
    let offset = text.len() / 2;
    c.bench_function("locate_mid_buffer", |b| {
        b.iter(|| locate(black_box(&text), black_box(offset)))
    });
}

fn bench_move_line(c: &mut Criterion) {
    let text = large_buffer();
    let selection = Selection::cursor(text.len() / 2);
    c.bench_function("move_line_mid_buffer", |b| {
        b.iter(|| move_line(black_box(&text), black_box(selection), MoveDirection::Down))
    });
}

criterion_group!(benches, bench_locate, bench_move_line);
criterion_main!(benches);
