//! Principal variation storage.
//!
//! [`PvTable`] collects the line while a search runs. [`PrincipalVariation`]
//! is what survives between searches: the line plus the position it starts
//! from, so a later search on a position further down the same line can
//! still use the remaining moves for ordering.

use dreamer_core::{Board, Move};

/// Deepest ply the triangular table can record.
pub const MAX_PLY: usize = 64;

/// Triangular table: row `ply` holds the best line found from that ply on.
pub struct PvTable {
    moves: Box<[[Move; MAX_PLY]; MAX_PLY]>,
    len: [usize; MAX_PLY],
}

impl PvTable {
    pub fn new() -> Self {
        Self {
            moves: Box::new([[Move::NONE; MAX_PLY]; MAX_PLY]),
            len: [0; MAX_PLY],
        }
    }

    /// Reset the row for a node entered at `ply`.
    #[inline]
    pub fn start_node(&mut self, ply: usize) {
        self.len[ply] = ply;
    }

    /// `mv` is the new best move at `ply`; its child's line follows it.
    pub fn update(&mut self, ply: usize, mv: Move) {
        let child_len = if ply + 1 < MAX_PLY {
            self.len[ply + 1].max(ply + 1)
        } else {
            ply + 1
        };
        self.moves[ply][ply] = mv;
        for i in ply + 1..child_len {
            self.moves[ply][i] = self.moves[ply + 1][i];
        }
        self.len[ply] = child_len;
    }

    /// Line found from the root.
    pub fn line(&self) -> &[Move] {
        &self.moves[0][..self.len[0]]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrincipalVariation {
    root: Option<Board>,
    moves: Vec<Move>,
}

impl PrincipalVariation {
    pub fn new(root: &Board, moves: Vec<Move>) -> Self {
        Self {
            root: Some(*root),
            moves,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Opponent reply expected after our best move.
    pub fn ponder_move(&self) -> Option<Move> {
        self.moves.get(1).copied()
    }

    /// Remaining moves of the line once `board` has been reached by
    /// following it. Empty when `board` is not on the line.
    pub fn line_from(&self, board: &Board) -> &[Move] {
        let Some(mut pos) = self.root else {
            return &[];
        };
        if pos.hash_key == board.hash_key {
            return &self.moves;
        }
        for (i, &mv) in self.moves.iter().enumerate() {
            pos.make_move(mv);
            if pos.hash_key == board.hash_key {
                return &self.moves[i + 1..];
            }
        }
        &[]
    }
}

#[cfg(test)]
#[path = "pv_tests.rs"]
mod pv_tests;
