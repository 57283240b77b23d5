//! Error types for position import and move parsing.

use thiserror::Error;

use crate::types::Color;

/// Reasons a FEN string was rejected. The board it was parsed into is left
/// untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks in the placement field, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files instead of 8")]
    RankLength { rank: u8, files: u32 },

    #[error("invalid piece letter '{0}'")]
    InvalidPiece(char),

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling letter '{0}'")]
    InvalidCastling(char),

    #[error("invalid en-passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),

    #[error("{color:?} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: u32 },

    #[error("pawn on the first or last rank")]
    PawnOnBackRank,
}

/// Errors raised while applying coordinate-notation commands to a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    #[error("move '{0}' is not legal in this position")]
    IllegalMove(String),

    #[error("malformed position command: {0}")]
    MalformedPosition(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}
