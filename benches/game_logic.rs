use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::autoplay::best_placement;
use blockfall::core::{Board, Piece, PieceBag, PieceCatalog};
use blockfall::engine::{Session, SessionConfig};
use blockfall::types::{PieceKind, RotationDirection};

fn spawned_board(kind: PieceKind) -> Board<'static> {
    let mut board = Board::new();
    let piece = Piece::from_catalog(PieceCatalog::standard(), kind).unwrap();
    board.spawn_piece(piece).unwrap();
    board
}

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::standard(SessionConfig::default().with_seed(12345)).unwrap();
    session.start().unwrap();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.is_game_over() {
                session = Session::standard(SessionConfig::default().with_seed(12345)).unwrap();
            }
            session.tick(black_box(16)).unwrap();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..10 {
                    board.set(row, col, true);
                }
            }
            board.clear_lines()
        })
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = PieceBag::seeded(21, 12345).unwrap();

    c.bench_function("bag_get_next", |b| b.iter(|| black_box(bag.get_next())));
}

fn bench_try_move(c: &mut Criterion) {
    let mut board = spawned_board(PieceKind::T);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            board.try_move(0, 1);
            board.try_move(0, -1);
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut board = spawned_board(PieceKind::T);
    board.try_fall();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            board.try_rotate(RotationDirection::Cw);
        })
    });
}

fn bench_best_placement(c: &mut Criterion) {
    let board = spawned_board(PieceKind::L);

    c.bench_function("best_placement", |b| b.iter(|| best_placement(black_box(&board))));
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_bag_draw,
    bench_try_move,
    bench_try_rotate,
    bench_best_placement
);
criterion_main!(benches);
