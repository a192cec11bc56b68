//! Live CPU-vs-CPU checkers game in the terminal.
//!
//! Usage:
//! `cargo run --release`
//! `cargo run --release -- --plies 40 --seed 7`
//! `cargo run --release -- --fast --verbose`

use plum_checkers::board::board::Board;
use plum_checkers::board::checkers_types::{Player, PlayerSide};
use plum_checkers::errors::CheckersError;
use plum_checkers::players::cpu::Cpu;
use plum_checkers::players::cpu_config::CpuConfig;
use plum_checkers::utils::render_board::render_board;

fn parse_arg_u64(flag: &str, default: u64) -> u64 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u64>() {
                return v;
            }
        }
    }
    default
}

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    let fast = std::env::args().any(|a| a == "--fast");
    let max_plies = parse_arg_u64("--plies", 60);
    let seed = parse_arg_u64("--seed", 1);

    let base = if fast {
        CpuConfig::instant()
    } else {
        CpuConfig::default()
    };
    let white = Player::new("White", PlayerSide::White);
    let black = Player::new("Black", PlayerSide::Black);
    let mut board = Board::standard(&white, &black);
    let mut cpus = [
        Cpu::new(white, base.with_seed(seed)),
        Cpu::new(black, base.with_seed(seed.wrapping_add(1))),
    ];

    println!("{}\n", render_board(&board));

    for ply in 0..max_plies {
        let cpu = &mut cpus[(ply % 2) as usize];
        let result = cpu.take_turn(
            |report| {
                if let Some(mv) = report.chosen {
                    println!("ply {}: {} {} -> {}", ply + 1, report.player, report.origin, mv);
                }
                if verbose {
                    for line in &report.info_lines {
                        println!("{line}");
                    }
                }
            },
            &mut board,
        );

        match result {
            Ok(()) => println!("{}\n", render_board(&board)),
            Err(CheckersError::NoUsablePieces(name)) => {
                println!("{name} has no usable pieces, game over");
                return Ok(());
            }
            Err(e) => return Err(e.to_string()),
        }
    }

    println!("stopped after {max_plies} plies");
    Ok(())
}
