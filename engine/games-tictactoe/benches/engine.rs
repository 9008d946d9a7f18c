use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use games_tictactoe::{Board, Player, TicTacToe};
use mcts::Domain;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_place");
    group.bench_function("place_center", |b| {
        let board = Board::new();
        b.iter(|| board.place(4));
    });
    group.finish();
}

fn bench_winner(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_winner");
    let boards: Vec<Board> = ["XXXOO....", "XOXXOOOXX", "X...O...."]
        .iter()
        .map(|cells| cells.parse().unwrap())
        .collect();
    group.bench_function("winner", |b| {
        b.iter(|| boards.iter().filter_map(Board::winner).count());
    });
    group.finish();
}

fn bench_domain(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_domain");

    group.bench_function("successors_empty_board", |b| {
        let board = Board::new();
        b.iter(|| TicTacToe.successors(&board));
    });

    group.bench_function("random_playout", |b| {
        b.iter_batched(
            || ChaCha20Rng::seed_from_u64(42),
            |mut rng| {
                let mut board = Board::new();
                while !board.is_done() {
                    let mut next = TicTacToe.successors(&board).unwrap();
                    let pick = rng.gen_range(0..next.len());
                    board = next.swap_remove(pick);
                }
                TicTacToe.is_win(&board, &Player::X)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_place, bench_winner, bench_domain);
criterion_main!(benches);
