pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use error::{FenError, UciError};
pub use fen::STARTPOS_FEN;
pub use movegen::*;
pub use moves::{Move, MoveKind};
pub use perft::{perft, perft_divide};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

/// What a search hands back to its caller.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play. [`Move::NONE`] when checkmated, a stalemate or resign
    /// marker when the game is over for other reasons.
    pub best_move: Move,
    /// Evaluation score in centipawns from the side to move's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    pub nodes: u64,
    /// Cut short by the clock or by the stop flag.
    pub stopped: bool,
    /// Expected line, starting with `best_move`.
    pub pv: Vec<Move>,
}

impl SearchResult {
    /// Predicted opponent reply, if the line is long enough.
    pub fn ponder_move(&self) -> Option<Move> {
        self.pv.get(1).copied().filter(Move::is_regular)
    }
}

/// Trait implemented by move-choosing engines.
pub trait Engine: Send {
    /// Search `board` within `limits` and return the move to play.
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult;

    /// Shown in the UCI `id name` line.
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "Dreamer developers"
    }

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}

    /// Apply a `setoption`. False when the name or value is not accepted.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
