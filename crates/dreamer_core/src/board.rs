//! Bitboard board state and the make/unmake mutator.
//!
//! The board keeps one mask per coloured piece plus one aggregate mask per
//! colour. Hash key, material and pawn counts are derived state maintained
//! incrementally by [`Board::make_move`] and [`Board::unmake_move`]; the
//! `*_from_scratch` methods recompute them so tests can cross-check.

use std::fmt;

use crate::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::moves::{Move, MoveKind};
use crate::types::*;
use crate::zobrist::ZOBRIST;

/// 12 piece masks followed by the white and black aggregates.
pub const NR_BITBOARDS: usize = 14;
pub const WHITE_ALL: usize = 12;
pub const BLACK_ALL: usize = 13;

/// Castle rights, has-castled markers and transient phantom-king markers.
///
/// Bits 0..4 are the rights and the only part that enters the hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastleFlags(u16);

impl CastleFlags {
    pub const WHITE_KINGSIDE: u16 = 1 << 0;
    pub const BLACK_KINGSIDE: u16 = 1 << 1;
    pub const WHITE_QUEENSIDE: u16 = 1 << 2;
    pub const BLACK_QUEENSIDE: u16 = 1 << 3;
    pub const WHITE_HAS_CASTLED: u16 = 1 << 4;
    pub const BLACK_HAS_CASTLED: u16 = 1 << 5;
    pub const WHITE_PHANTOM_KINGSIDE: u16 = 1 << 6;
    pub const WHITE_PHANTOM_QUEENSIDE: u16 = 1 << 7;
    pub const BLACK_PHANTOM_KINGSIDE: u16 = 1 << 8;
    pub const BLACK_PHANTOM_QUEENSIDE: u16 = 1 << 9;

    pub const RIGHTS_MASK: u16 = 0b1111;
    pub const PHANTOM_MASK: u16 = 0b1111 << 6;

    pub const ALL_RIGHTS: CastleFlags = CastleFlags(Self::RIGHTS_MASK);

    pub const fn empty() -> Self {
        CastleFlags(0)
    }

    pub const fn from_bits(bits: u16) -> Self {
        CastleFlags(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub const fn contains(self, bit: u16) -> bool {
        self.0 & bit == bit
    }

    #[inline(always)]
    pub fn insert(&mut self, bit: u16) {
        self.0 |= bit;
    }

    #[inline(always)]
    pub fn remove(&mut self, bit: u16) {
        self.0 &= !bit;
    }

    /// Right bit for `side` castling on `wing`.
    pub const fn right(side: Color, wing: CastleWing) -> u16 {
        match (side, wing) {
            (Color::White, CastleWing::Kingside) => Self::WHITE_KINGSIDE,
            (Color::Black, CastleWing::Kingside) => Self::BLACK_KINGSIDE,
            (Color::White, CastleWing::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleWing::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    pub const fn both_rights(side: Color) -> u16 {
        Self::right(side, CastleWing::Kingside) | Self::right(side, CastleWing::Queenside)
    }

    pub const fn has_castled_bit(side: Color) -> u16 {
        match side {
            Color::White => Self::WHITE_HAS_CASTLED,
            Color::Black => Self::BLACK_HAS_CASTLED,
        }
    }

    pub const fn phantom(side: Color, wing: CastleWing) -> u16 {
        match (side, wing) {
            (Color::White, CastleWing::Kingside) => Self::WHITE_PHANTOM_KINGSIDE,
            (Color::White, CastleWing::Queenside) => Self::WHITE_PHANTOM_QUEENSIDE,
            (Color::Black, CastleWing::Kingside) => Self::BLACK_PHANTOM_KINGSIDE,
            (Color::Black, CastleWing::Queenside) => Self::BLACK_PHANTOM_QUEENSIDE,
        }
    }

    #[inline]
    pub fn can_castle(self, side: Color, wing: CastleWing) -> bool {
        self.contains(Self::right(side, wing))
    }

    #[inline]
    pub fn has_castled(self, side: Color) -> bool {
        self.contains(Self::has_castled_bit(side))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleWing {
    Kingside,
    Queenside,
}

impl CastleWing {
    pub const BOTH: [CastleWing; 2] = [CastleWing::Kingside, CastleWing::Queenside];
}

/// King and rook squares of a castle: (king_from, king_to, rook_from, rook_to).
pub const fn castle_squares(side: Color, wing: CastleWing) -> (u8, u8, u8, u8) {
    match (side, wing) {
        (Color::White, CastleWing::Kingside) => (SQUARE_E1, SQUARE_G1, SQUARE_H1, SQUARE_F1),
        (Color::White, CastleWing::Queenside) => (SQUARE_E1, SQUARE_C1, SQUARE_A1, SQUARE_D1),
        (Color::Black, CastleWing::Kingside) => (SQUARE_E8, SQUARE_G8, SQUARE_H8, SQUARE_F8),
        (Color::Black, CastleWing::Queenside) => (SQUARE_E8, SQUARE_C8, SQUARE_A8, SQUARE_D8),
    }
}

/// Squares between king and rook that must be empty to castle.
pub const fn castle_empty_squares(side: Color, wing: CastleWing) -> Bitboard {
    match (side, wing) {
        (Color::White, CastleWing::Kingside) => Bitboard::from_squares(&[SQUARE_F1, SQUARE_G1]),
        (Color::Black, CastleWing::Kingside) => Bitboard::from_squares(&[SQUARE_F8, SQUARE_G8]),
        (Color::White, CastleWing::Queenside) => {
            Bitboard::from_squares(&[SQUARE_B1, SQUARE_C1, SQUARE_D1])
        }
        (Color::Black, CastleWing::Queenside) => {
            Bitboard::from_squares(&[SQUARE_B8, SQUARE_C8, SQUARE_D8])
        }
    }
}

/// Squares the king leaves or crosses while castling; phantom kings go here.
pub const fn phantom_squares(side: Color, wing: CastleWing) -> Bitboard {
    match (side, wing) {
        (Color::White, CastleWing::Kingside) => Bitboard::from_squares(&[SQUARE_E1, SQUARE_F1]),
        (Color::Black, CastleWing::Kingside) => Bitboard::from_squares(&[SQUARE_E8, SQUARE_F8]),
        (Color::White, CastleWing::Queenside) => Bitboard::from_squares(&[SQUARE_E1, SQUARE_D1]),
        (Color::Black, CastleWing::Queenside) => Bitboard::from_squares(&[SQUARE_E8, SQUARE_D8]),
    }
}

/// Rights lost when a move starts or ends on a square.
static CASTLE_REVOKE: [u16; 64] = {
    let mut table = [0u16; 64];
    table[SQUARE_A1 as usize] = CastleFlags::WHITE_QUEENSIDE;
    table[SQUARE_E1 as usize] = CastleFlags::WHITE_KINGSIDE | CastleFlags::WHITE_QUEENSIDE;
    table[SQUARE_H1 as usize] = CastleFlags::WHITE_KINGSIDE;
    table[SQUARE_A8 as usize] = CastleFlags::BLACK_QUEENSIDE;
    table[SQUARE_E8 as usize] = CastleFlags::BLACK_KINGSIDE | CastleFlags::BLACK_QUEENSIDE;
    table[SQUARE_H8 as usize] = CastleFlags::BLACK_KINGSIDE;
    table
};

/// The three fields `unmake_move` cannot derive from the move itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Irreversible {
    pub en_passant: Bitboard,
    pub castle_flags: CastleFlags,
    pub fifty_moves: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    pub bitboards: [Bitboard; NR_BITBOARDS],
    pub hash_key: u64,
    pub castle_flags: CastleFlags,
    /// Square passed over by the last double pawn push, set only when an
    /// enemy pawn can actually capture there.
    pub en_passant: Bitboard,
    pub current_player: Color,
    /// Centipawns per side, pawns included.
    pub material_value: [i32; 2],
    pub num_pawns: [u32; 2],
    /// Plies since the last pawn move or capture.
    pub fifty_moves: u32,
    pub fullmove_number: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// A board with nothing on it, white to move.
    pub fn empty() -> Self {
        Board {
            bitboards: [Bitboard::EMPTY; NR_BITBOARDS],
            hash_key: 0,
            castle_flags: CastleFlags::empty(),
            en_passant: Bitboard::EMPTY,
            current_player: Color::White,
            material_value: [0; 2],
            num_pawns: [0; 2],
            fifty_moves: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut board = Board::empty();
        board.setup();
        board
    }

    pub fn clear(&mut self) {
        *self = Board::empty();
    }

    pub fn setup(&mut self) {
        self.clear();

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            let file = file as u8;
            self.add_piece(file, Piece::new(kind, Color::White));
            self.add_piece(8 + file, Piece::WHITE_PAWN);
            self.add_piece(48 + file, Piece::BLACK_PAWN);
            self.add_piece(56 + file, Piece::new(kind, Color::Black));
        }

        self.set_castle_flags(CastleFlags::ALL_RIGHTS);
    }

    #[inline(always)]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.bitboards[piece.index()]
    }

    /// Aggregate mask of every piece of `color`.
    #[inline(always)]
    pub fn all(&self, color: Color) -> Bitboard {
        self.bitboards[WHITE_ALL + color.idx()]
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.bitboards[WHITE_ALL] | self.bitboards[BLACK_ALL]
    }

    /// Piece of `side` on `square`.
    ///
    /// Kings are tested first: a phantom king sharing a square with a rook
    /// after a castle must be reported so the probe sees the king.
    pub fn find_piece(&self, side: Color, square: u8) -> Option<Piece> {
        let king = Piece::new(PieceKind::King, side);
        if self.pieces(king).contains(square) {
            return Some(king);
        }

        // Remaining kinds in order of frequency.
        [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ]
        .into_iter()
        .map(|kind| Piece::new(kind, side))
        .find(|&piece| self.pieces(piece).contains(square))
    }

    /// Piece of either colour on `square`.
    pub fn piece_at(&self, square: u8) -> Option<Piece> {
        if self.all(Color::White).contains(square) {
            self.find_piece(Color::White, square)
        } else if self.all(Color::Black).contains(square) {
            self.find_piece(Color::Black, square)
        } else {
            None
        }
    }

    pub fn king_square(&self, side: Color) -> Option<u8> {
        self.pieces(Piece::new(PieceKind::King, side)).lsb()
    }

    /// Whether any piece of `by` attacks `square`.
    pub fn is_attacked(&self, square: u8, by: Color) -> bool {
        let occupied = self.occupied();
        let piece = |kind| self.pieces(Piece::new(kind, by));

        // A `by` pawn attacks `square` from where an opposite pawn on
        // `square` would attack.
        if pawn_attacks(square, by.other()).intersects(piece(PieceKind::Pawn)) {
            return true;
        }
        if knight_attacks(square).intersects(piece(PieceKind::Knight)) {
            return true;
        }
        if king_attacks(square).intersects(piece(PieceKind::King)) {
            return true;
        }
        let queens = piece(PieceKind::Queen);
        if bishop_attacks(square, occupied).intersects(piece(PieceKind::Bishop) | queens) {
            return true;
        }
        rook_attacks(square, occupied).intersects(piece(PieceKind::Rook) | queens)
    }

    /// Whether any king of `side`, phantom kings included, is attacked.
    pub fn in_check(&self, side: Color) -> bool {
        self.pieces(Piece::new(PieceKind::King, side))
            .any(|sq| self.is_attacked(sq, side.other()))
    }

    /// The side to move could take a king: the previous move was illegal.
    #[inline]
    pub fn king_capturable(&self) -> bool {
        self.in_check(self.current_player.other())
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.fifty_moves >= 100
    }

    pub fn irreversible(&self) -> Irreversible {
        Irreversible {
            en_passant: self.en_passant,
            castle_flags: self.castle_flags,
            fifty_moves: self.fifty_moves,
        }
    }

    /// Put transient kings on the start and transit squares of a castle
    /// and mark them in the phantom flags. Only meant for a probe copy;
    /// hash and material are left alone.
    pub fn place_phantom_kings(&mut self, side: Color, wing: CastleWing) {
        let squares = phantom_squares(side, wing);
        self.bitboards[Piece::new(PieceKind::King, side).index()] |= squares;
        self.bitboards[WHITE_ALL + side.idx()] |= squares;
        self.castle_flags.insert(CastleFlags::phantom(side, wing));
    }

    pub(crate) fn add_piece(&mut self, square: u8, piece: Piece) {
        debug_assert!(
            self.piece_at(square).is_none(),
            "square {} already occupied",
            sq_to_coord(square)
        );
        let color = piece.color();
        self.bitboards[piece.index()].set(square);
        self.bitboards[WHITE_ALL + color.idx()].set(square);
        self.hash_key ^= ZOBRIST.piece_key(piece, square);
        self.material_value[color.idx()] += piece.kind().value();
        if piece.kind() == PieceKind::Pawn {
            self.num_pawns[color.idx()] += 1;
        }
    }

    fn remove_piece(&mut self, square: u8, piece: Piece) {
        debug_assert!(
            self.pieces(piece).contains(square),
            "no {:?} on {}",
            piece,
            sq_to_coord(square)
        );
        let color = piece.color();
        self.bitboards[piece.index()].clear(square);
        self.bitboards[WHITE_ALL + color.idx()].clear(square);
        self.hash_key ^= ZOBRIST.piece_key(piece, square);
        self.material_value[color.idx()] -= piece.kind().value();
        if piece.kind() == PieceKind::Pawn {
            self.num_pawns[color.idx()] -= 1;
        }
    }

    fn ep_hash(mask: Bitboard) -> u64 {
        mask.lsb().map_or(0, |sq| ZOBRIST.ep_key(file_of(sq)))
    }

    pub(crate) fn set_en_passant(&mut self, mask: Bitboard) {
        self.hash_key ^= Self::ep_hash(self.en_passant) ^ Self::ep_hash(mask);
        self.en_passant = mask;
    }

    pub(crate) fn set_castle_flags(&mut self, flags: CastleFlags) {
        self.hash_key ^= ZOBRIST.castling_key(self.castle_flags) ^ ZOBRIST.castling_key(flags);
        self.castle_flags = flags;
    }

    pub(crate) fn set_side_to_move(&mut self, side: Color) {
        if side != self.current_player {
            self.hash_key ^= ZOBRIST.side_to_move;
            self.current_player = side;
        }
    }

    /// Whether a pawn of `by` stands ready to capture en passant on `target`.
    pub(crate) fn en_passant_capturable(&self, target: u8, by: Color) -> bool {
        pawn_attacks(target, by.other()).intersects(self.pieces(Piece::new(PieceKind::Pawn, by)))
    }

    /// Square of the pawn an en-passant capture removes, given the target
    /// mask from before the capture.
    fn en_passant_victim(target: Bitboard, mover: Color) -> u8 {
        let target = target.lsb().unwrap_or_default();
        match mover {
            Color::White => target - 8,
            Color::Black => target + 8,
        }
    }

    /// Apply `mv` in place. `mv` must be a regular move generated for this
    /// board; none/resign/stalemate moves leave the board untouched.
    pub fn make_move(&mut self, mv: Move) {
        if !mv.is_regular() {
            return;
        }
        let side = mv.piece_colour();
        debug_assert_eq!(side, self.current_player, "move for the wrong side");

        let old_en_passant = self.en_passant;
        let source = mv.source();
        let dest = mv.dest();
        let mut flags = self.castle_flags;

        self.set_en_passant(Bitboard::EMPTY);

        match mv.kind() {
            MoveKind::Normal | MoveKind::Capture => {
                if let Some(captured) = mv.captured_piece() {
                    self.remove_piece(dest, captured);
                }
                self.remove_piece(source, mv.piece());
                self.add_piece(dest, mv.piece());

                if mv.piece_kind() == PieceKind::Pawn && source.abs_diff(dest) == 16 {
                    let target = (source + dest) / 2;
                    if self.en_passant_capturable(target, side.other()) {
                        self.set_en_passant(Bitboard::from_square(target));
                    }
                }
            }
            MoveKind::Promotion | MoveKind::PromotionCapture => {
                if let Some(captured) = mv.captured_piece() {
                    self.remove_piece(dest, captured);
                }
                self.remove_piece(source, mv.moving_piece());
                self.add_piece(dest, mv.piece());
            }
            MoveKind::KingsideCastle | MoveKind::QueensideCastle => {
                let wing = castle_wing(mv.kind());
                let (king_from, king_to, rook_from, rook_to) = castle_squares(side, wing);
                let king = Piece::new(PieceKind::King, side);
                let rook = Piece::new(PieceKind::Rook, side);
                self.remove_piece(king_from, king);
                self.add_piece(king_to, king);
                self.remove_piece(rook_from, rook);
                self.add_piece(rook_to, rook);

                flags.remove(CastleFlags::both_rights(side));
                flags.insert(CastleFlags::has_castled_bit(side));
            }
            MoveKind::EnPassant => {
                debug_assert!(old_en_passant.contains(dest));
                let victim = Self::en_passant_victim(old_en_passant, side);
                if let Some(captured) = mv.captured_piece() {
                    self.remove_piece(victim, captured);
                }
                self.remove_piece(source, mv.piece());
                self.add_piece(dest, mv.piece());
            }
            MoveKind::None | MoveKind::Resign | MoveKind::Stalemate => unreachable!(),
        }

        flags.remove(CASTLE_REVOKE[source as usize] | CASTLE_REVOKE[dest as usize]);
        self.set_castle_flags(flags);

        self.fifty_moves = if mv.is_irreversible() {
            0
        } else {
            self.fifty_moves + 1
        };

        if side == Color::Black {
            self.fullmove_number += 1;
        }
        self.set_side_to_move(side.other());
    }

    /// Exact inverse of [`make_move`](Self::make_move). The three trailing
    /// arguments are the values the board held before `mv` was made.
    pub fn unmake_move(
        &mut self,
        mv: Move,
        old_en_passant: Bitboard,
        old_castle_flags: CastleFlags,
        old_fifty_moves: u32,
    ) {
        if !mv.is_regular() {
            return;
        }
        let side = mv.piece_colour();
        debug_assert_eq!(side.other(), self.current_player, "unmake for the wrong side");

        self.set_side_to_move(side);
        if side == Color::Black {
            self.fullmove_number -= 1;
        }

        let source = mv.source();
        let dest = mv.dest();

        match mv.kind() {
            MoveKind::Normal | MoveKind::Capture => {
                self.remove_piece(dest, mv.piece());
                self.add_piece(source, mv.piece());
                if let Some(captured) = mv.captured_piece() {
                    self.add_piece(dest, captured);
                }
            }
            MoveKind::Promotion | MoveKind::PromotionCapture => {
                self.remove_piece(dest, mv.piece());
                self.add_piece(source, mv.moving_piece());
                if let Some(captured) = mv.captured_piece() {
                    self.add_piece(dest, captured);
                }
            }
            MoveKind::KingsideCastle | MoveKind::QueensideCastle => {
                let wing = castle_wing(mv.kind());
                let (king_from, king_to, rook_from, rook_to) = castle_squares(side, wing);
                let king = Piece::new(PieceKind::King, side);
                let rook = Piece::new(PieceKind::Rook, side);
                self.remove_piece(rook_to, rook);
                self.add_piece(rook_from, rook);
                self.remove_piece(king_to, king);
                self.add_piece(king_from, king);
            }
            MoveKind::EnPassant => {
                self.remove_piece(dest, mv.piece());
                self.add_piece(source, mv.piece());
                if let Some(captured) = mv.captured_piece() {
                    self.add_piece(Self::en_passant_victim(old_en_passant, side), captured);
                }
            }
            MoveKind::None | MoveKind::Resign | MoveKind::Stalemate => unreachable!(),
        }

        self.set_en_passant(old_en_passant);
        self.set_castle_flags(old_castle_flags);
        self.fifty_moves = old_fifty_moves;
    }

    /// Hash recomputed from every field, ignoring the incremental key.
    pub fn hash_from_scratch(&self) -> u64 {
        let mut hash = 0;
        for piece in (0..Piece::COUNT).filter_map(Piece::from_index) {
            for sq in self.pieces(piece) {
                hash ^= ZOBRIST.piece_key(piece, sq);
            }
        }
        hash ^= ZOBRIST.castling_key(self.castle_flags);
        hash ^= Self::ep_hash(self.en_passant);
        if self.current_player == Color::Black {
            hash ^= ZOBRIST.side_to_move;
        }
        hash
    }

    /// Material values and pawn counts recomputed from the bitboards.
    pub fn material_from_scratch(&self) -> ([i32; 2], [u32; 2]) {
        let mut material = [0; 2];
        let mut pawns = [0; 2];
        for color in Color::BOTH {
            for kind in PieceKind::ALL {
                let count = self.pieces(Piece::new(kind, color)).popcount();
                material[color.idx()] += kind.value() * count as i32;
                if kind == PieceKind::Pawn {
                    pawns[color.idx()] = count;
                }
            }
        }
        (material, pawns)
    }
}

fn castle_wing(kind: MoveKind) -> CastleWing {
    match kind {
        MoveKind::QueensideCastle => CastleWing::Queenside,
        _ => CastleWing::Kingside,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let ch = self
                    .piece_at(rank * 8 + file)
                    .map_or('.', |piece| piece.to_char());
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
