//! Standalone CPU-vs-CPU series runner.
//!
//! Run with:
//! `cargo run --release --bin cpu_match_series`
//! `cargo run --release --bin cpu_match_series -- --games 50 --plies 150 --verbose`

use plum_checkers::utils::cpu_match_harness::{
    play_cpu_match_series, MatchConfig, MatchSeriesConfig,
};

fn parse_arg_u16(flag: &str, default: u16) -> u16 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u16>() {
                return v.max(1);
            }
        }
    }
    default
}

fn main() -> Result<(), String> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    let stats = play_cpu_match_series(&MatchSeriesConfig {
        games: parse_arg_u16("--games", 10),
        base_seed: 1234,
        per_game: MatchConfig {
            max_plies: parse_arg_u16("--plies", 200),
            verbose,
            ..MatchConfig::default()
        },
        verbose,
    })
    .map_err(|e| e.to_string())?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
