//! Forsyth-Edwards Notation import and export.

use crate::bitboard::Bitboard;
use crate::board::{castle_squares, Board, CastleFlags, CastleWing};
use crate::error::FenError;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a FEN string into a new board.
    ///
    /// The halfmove and fullmove counters may be omitted and default to
    /// 0 and 1.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut board = Board::empty();
        parse_placement(&mut board, parts[0])?;

        let side = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };
        board.set_side_to_move(side);

        let flags = parse_castling(&board, parts[2])?;
        board.set_castle_flags(flags);

        // Targets nobody can capture on are dropped, as make_move would.
        let ep = parse_en_passant(&board, parts[3], side)?;
        if ep.lsb().is_some_and(|sq| board.en_passant_capturable(sq, side)) {
            board.set_en_passant(ep);
        }

        board.fifty_moves = parse_counter(parts.get(4).copied().unwrap_or("0"))?;
        board.fullmove_number = parse_counter(parts.get(5).copied().unwrap_or("1"))?.max(1);

        Ok(board)
    }

    /// Replace this board with the FEN position. On error the board keeps
    /// its previous contents.
    pub fn setup_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Board::from_fen(fen)?;
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(rank * 8 + file) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.current_player {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = [
            (CastleFlags::WHITE_KINGSIDE, 'K'),
            (CastleFlags::WHITE_QUEENSIDE, 'Q'),
            (CastleFlags::BLACK_KINGSIDE, 'k'),
            (CastleFlags::BLACK_QUEENSIDE, 'q'),
        ];
        let before = fen.len();
        for (bit, ch) in rights {
            if self.castle_flags.contains(bit) {
                fen.push(ch);
            }
        }
        if fen.len() == before {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant.lsb() {
            Some(sq) => fen.push_str(&sq_to_coord(sq)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.fifty_moves, self.fullmove_number));
        fen
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut squares = [None; 64];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        let mut file = 0u32;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip;
                continue;
            }
            let piece = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
            if file < 8 {
                squares[(rank * 8) as usize + file as usize] = Some(piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(FenError::RankLength {
                rank: rank + 1,
                files: file,
            });
        }
    }

    for (sq, piece) in squares.iter().enumerate() {
        let Some(piece) = *piece else { continue };
        let back_rank = Bitboard::RANK_1 | Bitboard::RANK_8;
        if piece.kind() == PieceKind::Pawn && back_rank.contains(sq as u8) {
            return Err(FenError::PawnOnBackRank);
        }
        board.add_piece(sq as u8, piece);
    }

    for color in Color::BOTH {
        let count = board.pieces(Piece::new(PieceKind::King, color)).popcount();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }
    Ok(())
}

/// Castle letters. A right is kept only while its king and rook still
/// stand on their home squares.
fn parse_castling(board: &Board, field: &str) -> Result<CastleFlags, FenError> {
    let mut flags = CastleFlags::empty();
    if field == "-" {
        return Ok(flags);
    }
    for ch in field.chars() {
        let (side, wing) = match ch {
            'K' => (Color::White, CastleWing::Kingside),
            'Q' => (Color::White, CastleWing::Queenside),
            'k' => (Color::Black, CastleWing::Kingside),
            'q' => (Color::Black, CastleWing::Queenside),
            _ => return Err(FenError::InvalidCastling(ch)),
        };
        let (king_from, _, rook_from, _) = castle_squares(side, wing);
        let king_home = board
            .pieces(Piece::new(PieceKind::King, side))
            .contains(king_from);
        let rook_home = board
            .pieces(Piece::new(PieceKind::Rook, side))
            .contains(rook_from);
        if king_home && rook_home {
            flags.insert(CastleFlags::right(side, wing));
        }
    }
    Ok(flags)
}

fn parse_en_passant(board: &Board, field: &str, side: Color) -> Result<Bitboard, FenError> {
    if field == "-" {
        return Ok(Bitboard::EMPTY);
    }
    let invalid = || FenError::InvalidEnPassant(field.to_string());
    let sq = coord_to_sq(field).ok_or_else(invalid)?;
    // The target lies behind a pawn of the side that just moved, which
    // came from the square on the other side of it.
    let (expected_rank, victim, origin) = match side {
        Color::White => (5, sq.wrapping_sub(8), sq.wrapping_add(8)),
        Color::Black => (2, sq.wrapping_add(8), sq.wrapping_sub(8)),
    };
    if rank_of(sq) != expected_rank {
        return Err(invalid());
    }
    let pushed = board.piece_at(victim) == Some(Piece::new(PieceKind::Pawn, side.other()));
    if !pushed || board.piece_at(sq).is_some() || board.piece_at(origin).is_some() {
        return Err(invalid());
    }
    Ok(Bitboard::from_square(sq))
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field
        .parse()
        .map_err(|_| FenError::InvalidCounter(field.to_string()))
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
