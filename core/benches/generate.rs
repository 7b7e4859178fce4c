use animatch_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [6u8, 9, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut board = Board::new(BoardConfig::new((size, size))).unwrap();
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                board.generate_seeded(black_box(seed)).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_find_matches(c: &mut Criterion) {
    let mut board = Board::new(BoardConfig::new((16, 16))).unwrap();
    board.generate_seeded(514514).unwrap();
    c.bench_function("find_matches_16x16", |b| {
        b.iter(|| black_box(board.find_matches().unwrap()));
    });
}

criterion_group!(benches, bench_generate, bench_find_matches);
criterion_main!(benches);
