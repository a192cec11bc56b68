use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_checkers::board::board::Board;
use plum_checkers::board::checkers_types::{PieceId, Player, PlayerSide};
use plum_checkers::players::cpu::Cpu;
use plum_checkers::players::cpu_config::CpuConfig;
use plum_checkers::players::turn_clock::{SteppedTurnClock, TurnCancelToken};
use plum_checkers::utils::cpu_match_harness::{play_cpu_match, MatchConfig};

fn players() -> (Player, Player) {
    (
        Player::new("White", PlayerSide::White),
        Player::new("Black", PlayerSide::Black),
    )
}

fn selected_plies() -> u16 {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => 200,
        _ => 40,
    }
}

fn bench_move_calculation(c: &mut Criterion) {
    let (white, black) = players();
    let board = Board::standard(&white, &black);
    let ids: Vec<PieceId> = board.pieces().map(|(id, _)| id).collect();

    let mut group = c.benchmark_group("move_calc");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    group.bench_function("all_pieces_standard_setup", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for id in &ids {
                let piece = board.piece(*id).expect("piece on board");
                let moves = piece
                    .compute_available_moves(black_box(&board))
                    .expect("move calculation should succeed");
                total += moves.len();
            }
            black_box(total)
        });
    });

    group.bench_function("cpu_turn_instant", |b| {
        let clock = SteppedTurnClock::new();
        let cancel = TurnCancelToken::new();
        b.iter_batched(
            || {
                let (white, black) = players();
                let board = Board::standard(&white, &black);
                (Cpu::new(white, CpuConfig::instant().with_seed(3)), board)
            },
            |(mut cpu, mut board)| {
                cpu.take_turn_with_clock(
                    |r| {
                        black_box(r);
                    },
                    &mut board,
                    &clock,
                    &cancel,
                )
                .expect("turn should complete");
                board
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let plies = selected_plies();
    let mut group = c.benchmark_group("cpu_match");
    group.sample_size(20);

    for seed in [1u64, 2, 3] {
        let config = MatchConfig {
            max_plies: plies,
            ..MatchConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("seed{seed}_plies{plies}")),
            &seed,
            |b, seed| {
                b.iter(|| {
                    let result =
                        play_cpu_match(black_box(*seed), &config).expect("match should run");
                    black_box(result.played_moves.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(move_calc_benches, bench_move_calculation, bench_match);
criterion_main!(move_calc_benches);
