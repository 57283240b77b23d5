//! Position evaluation.

use dreamer_core::{Board, Color, Piece, PieceKind};

/// Pluggable "evaluate position" strategy consumed by the search.
pub trait Evaluator {
    /// Static score in centipawns from white's point of view.
    fn evaluate(&self, board: &Board) -> i32;
}

/// Material from the board's running totals plus small centre and
/// advancement bonuses for minor pieces and pawns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

/// Bonus per square for knights and bishops, white's view (a1 = index 0).
#[rustfmt::skip]
const MINOR_BONUS: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   5,   0,   0,   5,   0, -10,
    -10,   5,  10,  10,  10,  10,   5, -10,
    -10,   0,  10,  15,  15,  10,   0, -10,
    -10,   0,  10,  15,  15,  10,   0, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

/// Pawn advancement bonus per rank, white's view.
const PAWN_RANK_BONUS: [i32; 8] = [0, 0, 2, 5, 10, 20, 40, 0];

/// Bonus for having castled, kept small so material always dominates.
const CASTLED_BONUS: i32 = 15;

/// Mirror a square vertically so black pieces can use white's tables.
#[inline]
fn relative(sq: u8, color: Color) -> usize {
    match color {
        Color::White => sq as usize,
        Color::Black => (sq ^ 56) as usize,
    }
}

fn positional(board: &Board, color: Color) -> i32 {
    let mut score = 0;
    for kind in [PieceKind::Knight, PieceKind::Bishop] {
        for sq in board.pieces(Piece::new(kind, color)) {
            score += MINOR_BONUS[relative(sq, color)];
        }
    }
    for sq in board.pieces(Piece::new(PieceKind::Pawn, color)) {
        score += PAWN_RANK_BONUS[relative(sq, color) / 8];
    }
    if board.castle_flags.has_castled(color) {
        score += CASTLED_BONUS;
    }
    score
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let [white, black] = board.material_value;
        white - black + positional(board, Color::White) - positional(board, Color::Black)
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
