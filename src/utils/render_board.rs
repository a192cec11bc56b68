//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and the runner
//! binaries. File 0 is labelled `a`, rank 0 is labelled `1`, and rank 0 is
//! printed at the bottom.

use crate::board::board::Board;
use crate::board::checkers_types::{Coordinate, PlayerSide};
use crate::pieces::piece_state::PieceState;

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let files = file_labels(board.width());

    out.push_str("  ");
    out.push_str(&files);
    out.push('\n');

    for rank in (0..board.height()).rev() {
        let label = (rank + 1).to_string();
        out.push_str(&format!("{label:>2}"));
        out.push(' ');

        for file in 0..board.width() {
            let coordinate = Coordinate::new(file as i8, rank as i8);
            out.push(square_char(board, coordinate));
            if file + 1 < board.width() {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push_str(&label);
        out.push('\n');
    }

    out.push_str("  ");
    out.push_str(&files);
    out
}

fn file_labels(width: u8) -> String {
    (0..width)
        .map(|file| char::from(b'a' + file).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn square_char(board: &Board, coordinate: Coordinate) -> char {
    match board.piece_at(coordinate) {
        Some((_, piece)) => match (piece.owner().side, piece.state()) {
            (PlayerSide::White, PieceState::Lifted) => '⛁',
            (PlayerSide::Black, PieceState::Lifted) => '⛃',
            (PlayerSide::White, _) => '⛀',
            (PlayerSide::Black, _) => '⛂',
        },
        None => '·',
    }
}
