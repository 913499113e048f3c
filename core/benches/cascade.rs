use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use minesweep_core::*;

const LIMITS: BoardLimits = BoardLimits {
    min_height: 1,
    max_height: Coord::MAX,
    min_width: 1,
    max_width: Coord::MAX,
    min_mines: 1,
};

/// Board with a single mine in the far corner, so a guess at the origin
/// cascades over nearly every cell.
fn open_board(size: Coord) -> Board<FixedMinefieldGenerator> {
    let corner = size - 1;
    let mut board = Board::with_generator(LIMITS, FixedMinefieldGenerator::new([(corner, corner)]));
    board.initialize(GameConfig::new((size, size), 1)).unwrap();
    board
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    for size in [16, 64, 255] {
        group.bench_function(format!("open_{size}x{size}"), |b| {
            b.iter_batched(
                || open_board(size),
                |mut board| black_box(board.guess((0, 0), false).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_initialize(c: &mut Criterion) {
    let mut board = Board::with_seed(BoardLimits::default(), 0);
    c.bench_function("initialize_26x60_390", |b| {
        b.iter(|| board.initialize(black_box(GameConfig::new((26, 60), 390))).unwrap())
    });
}

criterion_group!(benches, bench_cascade, bench_initialize);
criterion_main!(benches);
