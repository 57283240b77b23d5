//! Encoded single-ply moves.

use std::fmt;

use crate::types::{sq_to_coord, Color, Piece, PieceKind};

/// What a move does to the board. Determines which fields
/// [`Board::make_move`](crate::board::Board::make_move) touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// No move at all (e.g. the mover is checkmated).
    None,
    Resign,
    Stalemate,
    Normal,
    Capture,
    Promotion,
    PromotionCapture,
    KingsideCastle,
    QueensideCastle,
    EnPassant,
}

/// One ply. Immutable once built.
///
/// For the promotion kinds `piece` is the piece the pawn turns into; the
/// piece leaving the source square is always a pawn of the same colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    source: u8,
    dest: u8,
    kind: MoveKind,
    captured: Option<Piece>,
}

impl Move {
    /// The empty move. Its piece and squares carry no meaning.
    pub const NONE: Move = Move {
        piece: Piece::WHITE_PAWN,
        source: 0,
        dest: 0,
        kind: MoveKind::None,
        captured: None,
    };

    pub fn new(piece: Piece, source: u8, dest: u8, kind: MoveKind, captured: Option<Piece>) -> Self {
        debug_assert!(source < 64 && dest < 64);
        debug_assert_eq!(
            captured.is_some(),
            matches!(
                kind,
                MoveKind::Capture | MoveKind::PromotionCapture | MoveKind::EnPassant
            ),
            "captured piece must match the move kind"
        );
        Move {
            piece,
            source,
            dest,
            kind,
            captured,
        }
    }

    /// Resignation by `side`.
    pub fn resign(side: Color) -> Self {
        Move {
            piece: Piece::new(PieceKind::King, side),
            kind: MoveKind::Resign,
            ..Move::NONE
        }
    }

    pub fn stalemate() -> Self {
        Move {
            kind: MoveKind::Stalemate,
            ..Move::NONE
        }
    }

    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub fn piece_kind(&self) -> PieceKind {
        self.piece.kind()
    }

    #[inline(always)]
    pub fn piece_colour(&self) -> Color {
        self.piece.color()
    }

    #[inline(always)]
    pub fn source(&self) -> u8 {
        self.source
    }

    #[inline(always)]
    pub fn dest(&self) -> u8 {
        self.dest
    }

    #[inline(always)]
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline(always)]
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn does_capture(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::Capture | MoveKind::PromotionCapture | MoveKind::EnPassant
        )
    }

    #[inline]
    pub fn does_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion | MoveKind::PromotionCapture)
    }

    /// True for moves that change the board, i.e. not none/resign/stalemate.
    #[inline]
    pub fn is_regular(&self) -> bool {
        !matches!(
            self.kind,
            MoveKind::None | MoveKind::Resign | MoveKind::Stalemate
        )
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.kind == MoveKind::None
    }

    /// Piece that leaves the source square.
    #[inline]
    pub fn moving_piece(&self) -> Piece {
        if self.does_promotion() {
            Piece::new(PieceKind::Pawn, self.piece.color())
        } else {
            self.piece
        }
    }

    /// Moves a pawn or captures, so the fifty-move counter restarts.
    #[inline]
    pub fn is_irreversible(&self) -> bool {
        self.does_capture() || self.moving_piece().kind() == PieceKind::Pawn
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_regular() {
            return write!(f, "Move({:?})", self.kind);
        }
        write!(
            f,
            "Move({} {}{} {:?}",
            self.piece,
            sq_to_coord(self.source),
            sq_to_coord(self.dest),
            self.kind
        )?;
        if let Some(captured) = self.captured {
            write!(f, " x{captured}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
