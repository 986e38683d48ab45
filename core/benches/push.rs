use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tileslide_core::*;

fn crowded_row() -> Board {
    let mut board = Board::new();
    board[(2, 0)] = Tile::DoubleArrow(Direction::Right);
    board[(2, 1)] = Tile::Block;
    board[(2, 2)] = Tile::Cracked;
    board[(2, 4)] = Tile::Hole;
    board[(0, 0)] = Tile::Arrow(Direction::Down);
    board[(1, 0)] = Tile::Drill;
    board
}

fn bench_resolve_push(c: &mut Criterion) {
    let board = crowded_row();
    c.bench_function("resolve_push/double_arrow", |b| {
        b.iter(|| resolve_push(black_box(&board), (2, 0), Direction::Right))
    });
    c.bench_function("resolve_push/blocked", |b| {
        b.iter(|| resolve_push(black_box(&board), (0, 0), Direction::Down))
    });
}

fn bench_playtest(c: &mut Criterion) {
    let mut builder = BuilderSession::default();
    for (tile, coords) in [
        (Tile::Arrow(Direction::Right), (2, 0)),
        (Tile::Block, (2, 1)),
        (Tile::Hole, (2, 2)),
    ] {
        builder.select_tile(tile);
        builder.paint(coords).unwrap();
    }

    c.bench_function("playtest_script/two_taps", |b| {
        b.iter(|| {
            let mut builder = builder.clone();
            builder.playtest_script(black_box(&[(2, 0), (2, 1)])).unwrap()
        })
    });
}

criterion_group!(benches, bench_resolve_push, bench_playtest);
criterion_main!(benches);
