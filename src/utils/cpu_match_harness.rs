//! Minimal head-to-head CPU match harness for local testing.
//!
//! Two `Cpu` players alternate on a standard board, driven by a stepped clock
//! so configured delays cost no wall time. A side that raises
//! `NoUsablePieces` loses; otherwise the game is drawn after `max_plies`.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::board::Board;
use crate::board::checkers_types::{Player, PlayerSide};
use crate::errors::{CheckersError, CheckersResult};
use crate::players::cpu::{Cpu, TurnReport};
use crate::players::cpu_config::CpuConfig;
use crate::players::turn_clock::{SteppedTurnClock, TurnCancelToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWin,
    BlackWin,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    /// Template for both players; each gets its own seed.
    pub cpu: CpuConfig,
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            cpu: CpuConfig::instant(),
            verbose: false,
        }
    }
}

#[derive(Debug)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub played_moves: Vec<String>,
    pub white_captures: u32,
    pub black_captures: u32,
    pub cancels: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub white_wins: u16,
    pub black_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<MatchOutcome>,
    pub total_plies: u32,
    pub total_captures: u32,
    pub total_cancels: u32,
    pub avg_turn_time_us: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} white_wins={} black_wins={} draws={} plies={} captures={} cancels={} avg_turn_us={:.3}",
            self.games,
            self.white_wins,
            self.black_wins,
            self.draws,
            self.total_plies,
            self.total_captures,
            self.total_cancels,
            self.avg_turn_time_us
        )
    }
}

/// Play one seeded CPU-vs-CPU game from the standard setup.
pub fn play_cpu_match(seed: u64, config: &MatchConfig) -> CheckersResult<MatchResult> {
    let white = Player::new("White", PlayerSide::White);
    let black = Player::new("Black", PlayerSide::Black);
    let board = Board::standard(&white, &black);
    play_cpu_match_from_board(board, white, black, seed, config)
}

/// Play one seeded game from a caller-provided position. White moves first.
pub fn play_cpu_match_from_board(
    mut board: Board,
    white: Player,
    black: Player,
    seed: u64,
    config: &MatchConfig,
) -> CheckersResult<MatchResult> {
    let mut seeds = StdRng::seed_from_u64(seed);
    let mut cpus = [
        Cpu::new(white, config.cpu.with_seed(seeds.random())),
        Cpu::new(black, config.cpu.with_seed(seeds.random())),
    ];
    let clock = SteppedTurnClock::new();
    let cancel = TurnCancelToken::new();

    let mut played_moves = Vec::new();
    let mut captures = [0u32; 2];
    let mut total_time_ns = [0u128; 2];
    let mut cancels = 0u32;

    let mut outcome = MatchOutcome::DrawMaxPlies;
    for ply in 0..config.max_plies {
        let mover = usize::from(ply % 2);
        let mut report: Option<TurnReport> = None;
        let started = Instant::now();
        let turn =
            cpus[mover].take_turn_with_clock(|r| report = Some(r), &mut board, &clock, &cancel);
        total_time_ns[mover] = total_time_ns[mover].saturating_add(started.elapsed().as_nanos());

        match turn {
            Ok(()) => {}
            Err(CheckersError::NoUsablePieces(name)) => {
                if config.verbose {
                    println!("[match] ply {ply}: {name} has no usable pieces");
                }
                outcome = if mover == 0 {
                    MatchOutcome::BlackWin
                } else {
                    MatchOutcome::WhiteWin
                };
                break;
            }
            Err(e) => return Err(e),
        }

        let report = report.ok_or_else(|| {
            CheckersError::InvariantViolated("turn ended without a report".to_owned())
        })?;
        if let Some(mv) = report.chosen {
            if mv.is_capture() {
                captures[mover] += 1;
            }
            if mv.is_cancel() {
                cancels += 1;
            }
            played_moves.push(format!("{} {} -> {}", report.player, report.origin, mv));
        }
        if config.verbose {
            for line in &report.info_lines {
                println!("[match] {line}");
            }
        }
    }

    Ok(MatchResult {
        outcome,
        final_board: board,
        played_moves,
        white_captures: captures[0],
        black_captures: captures[1],
        cancels,
        white_total_time_ns: total_time_ns[0],
        black_total_time_ns: total_time_ns[1],
    })
}

/// Play a series of seeded games and aggregate outcomes.
pub fn play_cpu_match_series(config: &MatchSeriesConfig) -> CheckersResult<MatchSeriesStats> {
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut total_time_ns = 0u128;

    for i in 0..config.games {
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            println!("[series] game {}/{} seed={}", i + 1, config.games, seed);
        }

        let result = play_cpu_match(seed, &config.per_game)?;
        match result.outcome {
            MatchOutcome::WhiteWin => stats.white_wins += 1,
            MatchOutcome::BlackWin => stats.black_wins += 1,
            MatchOutcome::DrawMaxPlies => stats.draws += 1,
        }
        stats.outcomes.push(result.outcome);
        stats.total_plies += result.played_moves.len() as u32;
        stats.total_captures += result.white_captures + result.black_captures;
        stats.total_cancels += result.cancels;
        total_time_ns += result.white_total_time_ns + result.black_total_time_ns;

        if config.verbose {
            println!(
                "[series] game {} outcome={:?} plies={}",
                i + 1,
                result.outcome,
                result.played_moves.len()
            );
        }
    }

    if stats.total_plies > 0 {
        stats.avg_turn_time_us = total_time_ns as f64 / f64::from(stats.total_plies) / 1_000.0;
    }
    Ok(stats)
}
