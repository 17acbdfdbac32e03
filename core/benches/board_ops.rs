use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use minefinity_core::{Board, BoardConfig, CellData, Pos3};

/// A bomb-free plane fenced in by a square bomb wall, so the cascade under
/// measurement has a fixed footprint instead of running off to infinity.
fn walled_board(radius: i64) -> Board {
    let mut board = Board::new(BoardConfig {
        seed: 0,
        bomb_probability: 0.0,
        safe_zone: true,
    });
    for x in -radius..=radius {
        for y in -radius..=radius {
            if x.abs().max(y.abs()) == radius {
                board.grid_mut().set_cell((x, y, 0), CellData::new(true));
            }
        }
    }
    board
}

fn bench_reveal_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_cluster");
    for radius in [8i64, 16, 32] {
        group.bench_function(format!("walled_r{radius}"), |b| {
            b.iter_batched(
                || walled_board(radius),
                |mut board| black_box(board.reveal_cluster((0, 0, 0))),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.bench_function("dense_p40", |b| {
        b.iter_batched(
            || Board::new(BoardConfig::new(1234, 0.4)),
            |mut board| black_box(board.reveal_cluster((0, 0, 0))),
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");
    for radius in [16i64, 32] {
        let mut board = walled_board(radius);
        board.reveal_cluster((0, 0, 0));
        let source: Pos3 = (-(radius - 2), 0, 0);
        let target = (radius - 2, 0);
        group.bench_function(format!("across_r{radius}"), |b| {
            b.iter(|| black_box(board.find_path(black_box(source), black_box(target))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reveal_cluster, bench_find_path);
criterion_main!(benches);
