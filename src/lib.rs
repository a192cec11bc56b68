//! Crate root module declarations for the Plum Checkers core.
//!
//! This file exposes the board model, square-selection rules, pieces and
//! their moves, the automated player, presentation hooks, and the debugging
//! utilities so binaries, benches, and host applications can import stable
//! module paths.

pub mod errors;

pub mod board {
    pub mod board;
    pub mod checkers_types;
    pub mod coordinate;
}

pub mod rules {
    pub mod square_selection_rule;
    pub mod square_selection_rule_set;
}

pub mod moves {
    pub mod available_moves;
    pub mod checkers_move;
}

pub mod pieces {
    pub mod checkers_pawn;
    pub mod piece;
    pub mod piece_state;
}

pub mod players {
    pub mod cpu;
    pub mod cpu_config;
    pub mod turn_clock;
}

pub mod presentation {
    pub mod hooks;
}

pub mod utils {
    pub mod cpu_match_harness;
    pub mod render_board;
}
