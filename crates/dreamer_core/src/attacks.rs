//! Pre-computed attack tables.
//!
//! Leapers (knight, king, pawn) use one table per square. Sliders walk the
//! eight pre-computed rays and cut each ray at its first blocker.

use crate::bitboard::Bitboard;
use crate::types::Color;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Ray directions, indexed as N, NE, E, SE, S, SW, W, NW.
/// Even indices are orthogonal, odd indices diagonal.
const RAY_DELTAS: [(i8, i8); 8] = KING_DELTAS;

/// Rays that grow toward higher square indices (first blocker is the LSB).
const fn ray_is_positive(dir: usize) -> bool {
    let (df, dr) = RAY_DELTAS[dir];
    dr > 0 || (dr == 0 && df > 0)
}

const fn step_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

pub static KNIGHT_ATTACKS: [Bitboard; 64] = step_table(&KNIGHT_DELTAS);
pub static KING_ATTACKS: [Bitboard; 64] = step_table(&KING_DELTAS);
pub static WHITE_PAWN_ATTACKS: [Bitboard; 64] = step_table(&[(-1, 1), (1, 1)]);
pub static BLACK_PAWN_ATTACKS: [Bitboard; 64] = step_table(&[(-1, -1), (1, -1)]);

/// RAYS[direction][square]: every square from `square` toward the board
/// edge in that direction, `square` itself excluded.
pub static RAYS: [[Bitboard; 64]; 8] = {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = RAY_DELTAS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            let mut bits = 0u64;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << ((r * 8 + f) as u32);
                f += df;
                r += dr;
            }
            rays[dir][sq] = Bitboard(bits);
            sq += 1;
        }
        dir += 1;
    }
    rays
};

#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[sq as usize],
        Color::Black => BLACK_PAWN_ATTACKS[sq as usize],
    }
}

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

#[inline]
fn ray_attacks(sq: u8, dir: usize, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq as usize];
    let blockers = ray & occupied;
    let first = if ray_is_positive(dir) {
        blockers.lsb()
    } else {
        blockers.msb()
    };
    match first {
        // The blocker itself stays attackable; everything behind it does not.
        Some(blocker) => ray & !RAYS[dir][blocker as usize],
        None => ray,
    }
}

#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, 1, occupied)
        | ray_attacks(sq, 3, occupied)
        | ray_attacks(sq, 5, occupied)
        | ray_attacks(sq, 7, occupied)
}

#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, 0, occupied)
        | ray_attacks(sq, 2, occupied)
        | ray_attacks(sq, 4, occupied)
        | ray_attacks(sq, 6, occupied)
}

#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
