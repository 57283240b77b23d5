//! Move generation.
//!
//! Generators produce pseudo-legal moves: everything the pieces can do,
//! except that castling through or out of check is already rejected by the
//! phantom-king probe. Leaving the own king attacked is detected afterwards
//! with [`Board::king_capturable`].

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::board::{castle_empty_squares, castle_squares, Board, CastleWing};
use crate::moves::{Move, MoveKind};
use crate::types::*;

/// Pluggable "generate moves" strategy consumed by the search.
pub trait MoveGenerator {
    /// Append every pseudo-legal move of the side to move to `out`.
    fn generate(&self, board: &Board, out: &mut Vec<Move>);
}

/// Default generator built on the attack tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitboardMoveGen;

impl MoveGenerator for BitboardMoveGen {
    fn generate(&self, board: &Board, out: &mut Vec<Move>) {
        pseudo_moves(board, out);
    }
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut tmp = *board;
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(board: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(board, out);

    // Play each candidate on the board itself and drop those that expose a king.
    out.retain(|&mv| {
        let saved = board.irreversible();
        board.make_move(mv);
        let illegal = board.king_capturable();
        board.unmake_move(mv, saved.en_passant, saved.castle_flags, saved.fifty_moves);
        !illegal
    });
}

/// Whether castling on `wing` would start in, cross, or land on an attacked
/// square.
///
/// Works on its own copy of the board: the castle is made, phantom kings
/// are dropped on the start and transit squares, and the opponent is asked
/// whether any king can be taken. The caller's board is never touched.
pub fn castle_passes_through_check(board: Board, side: Color, wing: CastleWing) -> bool {
    let mut probe = board;
    probe.make_move(castle_move(side, wing));
    probe.place_phantom_kings(side, wing);
    probe.king_capturable()
}

pub fn castle_move(side: Color, wing: CastleWing) -> Move {
    let (king_from, king_to, _, _) = castle_squares(side, wing);
    let kind = match wing {
        CastleWing::Kingside => MoveKind::KingsideCastle,
        CastleWing::Queenside => MoveKind::QueensideCastle,
    };
    Move::new(Piece::new(PieceKind::King, side), king_from, king_to, kind, None)
}

pub fn pseudo_moves(board: &Board, out: &mut Vec<Move>) {
    let side = board.current_player;
    let own = board.all(side);
    let occupied = board.occupied();

    gen_pawns(board, side, out);

    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        let piece = Piece::new(kind, side);
        for from in board.pieces(piece) {
            let targets = match kind {
                PieceKind::Knight => knight_attacks(from),
                PieceKind::Bishop => bishop_attacks(from, occupied),
                PieceKind::Rook => rook_attacks(from, occupied),
                PieceKind::Queen => queen_attacks(from, occupied),
                _ => king_attacks(from),
            };
            for to in targets & !own {
                push_step(board, piece, from, to, out);
            }
        }
    }

    gen_castles(board, side, out);
}

fn push_step(board: &Board, piece: Piece, from: u8, to: u8, out: &mut Vec<Move>) {
    match board.find_piece(piece.color().other(), to) {
        Some(captured) => out.push(Move::new(piece, from, to, MoveKind::Capture, Some(captured))),
        None => out.push(Move::new(piece, from, to, MoveKind::Normal, None)),
    }
}

fn push_promotions(side: Color, from: u8, to: u8, captured: Option<Piece>, out: &mut Vec<Move>) {
    let kind = if captured.is_some() {
        MoveKind::PromotionCapture
    } else {
        MoveKind::Promotion
    };
    for promo in PieceKind::PROMOTIONS {
        out.push(Move::new(Piece::new(promo, side), from, to, kind, captured));
    }
}

fn gen_pawns(board: &Board, side: Color, out: &mut Vec<Move>) {
    let pawn = Piece::new(PieceKind::Pawn, side);
    let empty = !board.occupied();
    let enemies = board.all(side.other());
    let (promo_rank, double_rank) = match side {
        Color::White => (Bitboard::RANK_8, Bitboard::RANK_3),
        Color::Black => (Bitboard::RANK_1, Bitboard::RANK_6),
    };
    let forward = |bb: Bitboard| match side {
        Color::White => bb.north(),
        Color::Black => bb.south(),
    };

    for from in board.pieces(pawn) {
        let from_bb = Bitboard::from_square(from);

        let single = forward(from_bb) & empty;
        if let Some(to) = single.lsb() {
            if promo_rank.contains(to) {
                push_promotions(side, from, to, None, out);
            } else {
                out.push(Move::new(pawn, from, to, MoveKind::Normal, None));
                // Two steps only through an empty third/sixth rank square.
                if let Some(to2) = (forward(single & double_rank) & empty).lsb() {
                    out.push(Move::new(pawn, from, to2, MoveKind::Normal, None));
                }
            }
        }

        let attacks = pawn_attacks(from, side);
        for to in attacks & enemies {
            let captured = board.find_piece(side.other(), to);
            if promo_rank.contains(to) {
                push_promotions(side, from, to, captured, out);
            } else {
                out.push(Move::new(pawn, from, to, MoveKind::Capture, captured));
            }
        }

        if let Some(to) = (attacks & board.en_passant).lsb() {
            let victim = Piece::new(PieceKind::Pawn, side.other());
            out.push(Move::new(pawn, from, to, MoveKind::EnPassant, Some(victim)));
        }
    }
}

fn gen_castles(board: &Board, side: Color, out: &mut Vec<Move>) {
    let occupied = board.occupied();
    for wing in CastleWing::BOTH {
        if !board.castle_flags.can_castle(side, wing) {
            continue;
        }
        if castle_empty_squares(side, wing).intersects(occupied) {
            continue;
        }
        if castle_passes_through_check(*board, side, wing) {
            continue;
        }
        out.push(castle_move(side, wing));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
