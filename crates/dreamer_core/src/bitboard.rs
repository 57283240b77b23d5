//! Square-set masks over the 64 board squares.
//!
//! Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A set of squares, one bit per square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_3: Bitboard = Bitboard(0x0000_0000_00FF_0000);
    pub const RANK_6: Bitboard = Bitboard(0x0000_FF00_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    // Wrap guards for east/west steps
    pub const NOT_FILE_A: Bitboard = Bitboard(!0x0101_0101_0101_0101);
    pub const NOT_FILE_H: Bitboard = Bitboard(!0x8080_8080_8080_8080);
    pub const NOT_FILE_AB: Bitboard = Bitboard(!0x0303_0303_0303_0303);
    pub const NOT_FILE_GH: Bitboard = Bitboard(!0xC0C0_C0C0_C0C0_C0C0);

    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u64 << sq)
    }

    /// Union of several single squares.
    pub const fn from_squares(squares: &[u8]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < squares.len() {
            bits |= 1u64 << squares[i];
            i += 1;
        }
        Bitboard(bits)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        (self.0 & (1u64 << sq)) != 0
    }

    #[inline(always)]
    pub const fn intersects(self, other: Bitboard) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u64 << sq;
    }

    #[inline(always)]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u64 << sq);
    }

    /// Population count.
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest set square, or None if empty.
    #[inline(always)]
    pub const fn lsb(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Highest set square, or None if empty.
    #[inline(always)]
    pub const fn msb(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros() as u8)
        }
    }

    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u8> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Shift toward rank 8.
    #[inline(always)]
    pub const fn north(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    /// Shift toward rank 1.
    #[inline(always)]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }
}

macro_rules! bit_ops {
    ($($op:ident::$f:ident, $op_assign:ident::$f_assign:ident => $tok:tt;)*) => {$(
        impl $op for Bitboard {
            type Output = Bitboard;
            #[inline(always)]
            fn $f(self, rhs: Bitboard) -> Bitboard {
                Bitboard(self.0 $tok rhs.0)
            }
        }

        impl $op_assign for Bitboard {
            #[inline(always)]
            fn $f_assign(&mut self, rhs: Bitboard) {
                *self = Bitboard(self.0 $tok rhs.0);
            }
        }
    )*};
}

bit_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign => &;
    BitOr::bitor, BitOrAssign::bitor_assign => |;
    BitXor::bitxor, BitXorAssign::bitxor_assign => ^;
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline(always)]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Iterates set squares from a1 upward.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lsb()
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
