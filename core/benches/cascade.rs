use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use mineclear_core::*;
use rand::{SeedableRng, rngs::SmallRng};
use std::hint::black_box;

const LARGEST: Coord2 = (Coord::MAX, Coord::MAX);

fn bench_place_mines(c: &mut Criterion) {
    let board = Board::<Unseeded>::new(LARGEST).unwrap();
    let mut group = c.benchmark_group("place_mines");
    for density in [10u16, 20, 40] {
        let mines = mult(LARGEST.0, LARGEST.1) / 100 * density;
        group.bench_function(format!("{density}pct"), |b| {
            let mut rng = SmallRng::seed_from_u64(20261014);
            b.iter(|| black_box(board.place_mines(mines, (127, 127), &mut rng).unwrap()))
        });
    }
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    // no mines, the first open floods the whole board
    let empty = GameConfig::new(LARGEST, 0).unwrap();
    c.bench_function("open/full_board_cascade", |b| {
        b.iter_batched(
            || Session::new(empty, 1),
            |mut session| black_box(session.open((0, 0)).unwrap()),
            BatchSize::LargeInput,
        )
    });

    let sparse = GameConfig::new(LARGEST, 2000).unwrap();
    c.bench_function("open/sparse_first_click", |b| {
        b.iter_batched(
            || Session::new(sparse, 7),
            |mut session| black_box(session.open((127, 127)).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_place_mines, bench_cascade);
criterion_main!(benches);
