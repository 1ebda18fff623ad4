use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stacker::core::{Board, PieceBag, TetrisGame};
use stacker::types::{Cell, GameAction, PieceKind};

fn bench_step(c: &mut Criterion) {
    let mut game = TetrisGame::with_seed(12345);
    game.start();

    c.bench_function("game_step_16ms", |b| {
        b.iter(|| {
            if game.game_over() {
                game = TetrisGame::with_seed(12345);
                game.start();
            }
            let _ = game.step(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::standard();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Cell::Block(PieceKind::I));
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_clear_separated_rows(c: &mut Criterion) {
    let mut template = Board::standard();
    for y in [5, 9, 14, 19] {
        for x in 0..10 {
            template.set(x, y, Cell::Block(PieceKind::J));
        }
    }
    c.bench_function("clear_and_shift_separated", |b| {
        b.iter(|| {
            let mut board = template.clone();
            board.clear_and_shift(black_box(&[19usize, 14, 9, 5][..]));
            board
        })
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = PieceBag::new(12345);
    c.bench_function("bag_draw", |b| b.iter(|| bag.draw()));
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut game = TetrisGame::with_seed(12345);
    game.start();

    c.bench_function("move_rotate", |b| {
        b.iter(|| {
            let _ = game.apply(GameAction::MoveRight);
            let _ = game.apply(GameAction::RotateCw);
            let _ = game.apply(GameAction::MoveLeft);
        })
    });
}

fn bench_display_board(c: &mut Criterion) {
    let mut game = TetrisGame::with_seed(12345);
    game.start();
    c.bench_function("display_board", |b| b.iter(|| game.display_board()));
}

criterion_group!(
    benches,
    bench_step,
    bench_line_clear,
    bench_clear_separated_rows,
    bench_bag_draw,
    bench_move_and_rotate,
    bench_display_board
);
criterion_main!(benches);
