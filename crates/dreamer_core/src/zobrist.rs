//! Zobrist keys for incremental position hashing.
//!
//! The board hash is the XOR of one key per occupied (piece, square), one
//! key per castle right held, the key of the en-passant file when a target
//! square is set, and the side key when black is to move. Every component
//! is its own inverse, which is what lets `unmake_move` restore the hash
//! exactly by replaying the same XORs.

use crate::board::CastleFlags;
use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by [piece index][square].
    pub pieces: [[u64; 64]; Piece::COUNT],
    /// XORed in while black is to move.
    pub side_to_move: u64,
    /// One key per castle-right bit (flag bits 0..4).
    pub castling: [u64; 4],
    /// One key per en-passant file.
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Deterministic keys from a fixed-seed xorshift64 stream.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[0u64; 64]; Piece::COUNT];
        let mut piece = 0;
        while piece < Piece::COUNT {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                pieces[piece][sq] = state;
                sq += 1;
            }
            piece += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.index()][sq as usize]
    }

    /// Combined key of every castle right held in `flags`. Has-castled and
    /// phantom bits do not take part in the hash.
    #[inline]
    pub fn castling_key(&self, flags: CastleFlags) -> u64 {
        let mut key = 0;
        for (bit, k) in self.castling.iter().enumerate() {
            if flags.bits() & (1 << bit) != 0 {
                key ^= k;
            }
        }
        key
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
