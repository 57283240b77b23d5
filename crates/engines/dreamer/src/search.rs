//! Minimax search with alpha-beta pruning
//!
//! Scores are always from the point of view of the side to move at the
//! root. Max nodes are the root mover's turns, Min nodes the opponent's.

use std::cmp::Reverse;

use dreamer_core::{Board, Color, Move, MoveGenerator, TimeControl};
use tracing::debug;

use crate::eval::Evaluator;
use crate::pv::PvTable;

/// Lowest score a legal line can have.
pub const ALPHABETA_MIN: i32 = -30000;
/// Highest score a legal line can have.
pub const ALPHABETA_MAX: i32 = 30000;
/// Returned to a Max parent for a move that left its king capturable. A
/// Min parent receives the negation.
pub const ALPHABETA_ILLEGAL: i32 = -31000;
/// Score of being mated at the root; each ply of distance adds one.
pub const ALPHABETA_CHECKMATE: i32 = -29000;

/// Deepest iteration the search accepts.
pub const MAX_DEPTH: u8 = 32;

/// Anything this far from zero is a forced mate.
const MATE_BOUND: i32 = -ALPHABETA_CHECKMATE - 2 * MAX_DEPTH as i32;

/// Ordering weights; the king counts as the most expensive attacker.
const ORDER_VALUE: [i32; 6] = [100, 320, 330, 500, 900, 2000];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Max,
    Min,
}

impl NodeType {
    #[inline]
    pub fn flip(self) -> NodeType {
        match self {
            NodeType::Max => NodeType::Min,
            NodeType::Min => NodeType::Max,
        }
    }

    /// Score a node of this type receives from an illegal child.
    #[inline]
    pub fn illegal_score(self) -> i32 {
        match self {
            NodeType::Max => ALPHABETA_ILLEGAL,
            NodeType::Min => -ALPHABETA_ILLEGAL,
        }
    }
}

/// Root position status, decided before any searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootState {
    Playable,
    Checkmated,
    Stalemated,
}

/// Result of [`iterate`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub root: RootState,
    /// Best move of the deepest completed iteration, or the first legal
    /// move if not even depth 1 finished.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest completed iteration, 0 if none completed.
    pub depth: u8,
    pub pv: Vec<Move>,
    pub nodes: u64,
    /// True if search was stopped early
    pub stopped: bool,
}

pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_BOUND && score.abs() <= -ALPHABETA_CHECKMATE
}

/// MVV-LVA key plus a promotion bonus.
fn order_key(mv: &Move) -> i32 {
    let mut key = 0;
    if let Some(victim) = mv.captured_piece() {
        let attacker = mv.moving_piece().kind();
        key += 10_000 + ORDER_VALUE[victim.kind().idx()] * 10 - ORDER_VALUE[attacker.idx()];
    }
    if mv.does_promotion() {
        key += ORDER_VALUE[mv.piece_kind().idx()];
    }
    key
}

/// Sort `moves` best-first for pruning: captures by most valuable victim
/// then least valuable attacker, then promotions, then quiet moves in
/// generation order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(order_key(mv)));
}

struct Searcher<'a, G, E> {
    generator: &'a G,
    evaluator: &'a E,
    tc: &'a TimeControl,
    /// +1 if white moved at the root, -1 otherwise.
    sign: i32,
    table: PvTable,
    /// Line of the previous iteration, tried first while still on it.
    hint: Vec<Move>,
    follow_pv: bool,
    nodes: u64,
    stopped: bool,
}

impl<G: MoveGenerator, E: Evaluator> Searcher<'_, G, E> {
    fn evaluate(&self, board: &Board) -> i32 {
        self.sign * self.evaluator.evaluate(board)
    }

    /// Legal root moves, ordered.
    fn root_moves(&self, board: &mut Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.generator.generate(board, &mut moves);
        moves.retain(|&mv| {
            let saved = board.irreversible();
            board.make_move(mv);
            let legal = !board.king_capturable();
            board.unmake_move(mv, saved.en_passant, saved.castle_flags, saved.fifty_moves);
            legal
        });
        order_moves(&mut moves);
        moves
    }

    /// Put the remembered move for this ply in front, or leave the line.
    fn order(&mut self, moves: &mut [Move], ply: usize) {
        order_moves(moves);
        let pv_move = if self.follow_pv {
            self.hint.get(ply).copied()
        } else {
            None
        };
        match pv_move.and_then(|pv| moves.iter().position(|&m| m == pv)) {
            Some(i) => moves[..=i].rotate_right(1),
            None => self.follow_pv = false,
        }
    }

    fn alphabeta(
        &mut self,
        board: &mut Board,
        depth: u8,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
        node: NodeType,
    ) -> i32 {
        self.table.start_node(ply);

        // The previous move left a king en prise.
        if board.king_capturable() {
            return node.flip().illegal_score();
        }

        self.nodes += 1;
        if self.tc.poll(self.nodes) {
            self.stopped = true;
            return 0;
        }

        if ply > 0 && board.is_fifty_move_draw() {
            return 0;
        }
        if depth == 0 {
            return self.evaluate(board);
        }

        let mut moves = Vec::with_capacity(64);
        self.generator.generate(board, &mut moves);
        self.order(&mut moves, ply);

        let mut best = match node {
            NodeType::Max => ALPHABETA_MIN,
            NodeType::Min => ALPHABETA_MAX,
        };
        let mut legal = 0u32;

        for mv in moves {
            let saved = board.irreversible();
            board.make_move(mv);
            let score = self.alphabeta(board, depth - 1, ply + 1, alpha, beta, node.flip());
            board.unmake_move(mv, saved.en_passant, saved.castle_flags, saved.fifty_moves);
            // Only the first child can still be on the remembered line.
            self.follow_pv = false;

            if self.stopped {
                return best;
            }
            if score == node.illegal_score() {
                continue;
            }
            legal += 1;

            match node {
                NodeType::Max => {
                    if score > best {
                        best = score;
                        self.table.update(ply, mv);
                    }
                    alpha = alpha.max(best);
                }
                NodeType::Min => {
                    if score < best {
                        best = score;
                        self.table.update(ply, mv);
                    }
                    beta = beta.min(best);
                }
            }
            if alpha >= beta {
                break;
            }
        }

        if legal == 0 {
            if !board.in_check(board.current_player) {
                return 0;
            }
            let mated = ALPHABETA_CHECKMATE + ply as i32;
            return match node {
                NodeType::Max => mated,
                NodeType::Min => -mated,
            };
        }
        best
    }
}

/// Iterative deepening from depth 1 to `max_depth`.
///
/// `hint` is a previously found line starting at `board`; its moves are
/// tried first during the first iteration. Results of an iteration cut
/// short by the stop flag are discarded.
pub fn iterate<G: MoveGenerator, E: Evaluator>(
    generator: &G,
    evaluator: &E,
    board: &Board,
    max_depth: u8,
    tc: &TimeControl,
    hint: &[Move],
) -> SearchOutcome {
    let mut board = *board;
    let mut searcher = Searcher {
        generator,
        evaluator,
        tc,
        sign: match board.current_player {
            Color::White => 1,
            Color::Black => -1,
        },
        table: PvTable::new(),
        hint: hint.to_vec(),
        follow_pv: true,
        nodes: 0,
        stopped: false,
    };

    let root_moves = searcher.root_moves(&mut board);
    let mut outcome = SearchOutcome {
        root: RootState::Playable,
        best_move: None,
        score: 0,
        depth: 0,
        pv: Vec::new(),
        nodes: 0,
        stopped: false,
    };

    if root_moves.is_empty() {
        if board.in_check(board.current_player) {
            outcome.root = RootState::Checkmated;
            outcome.score = ALPHABETA_CHECKMATE;
        } else {
            outcome.root = RootState::Stalemated;
        }
        return outcome;
    }

    // Prefer the remembered move if it is still legal.
    outcome.best_move = hint
        .first()
        .filter(|mv| root_moves.contains(*mv))
        .or(root_moves.first())
        .copied();

    for depth in 1..=max_depth.clamp(1, MAX_DEPTH) {
        searcher.follow_pv = true;
        let score = searcher.alphabeta(
            &mut board,
            depth,
            0,
            ALPHABETA_MIN,
            ALPHABETA_MAX,
            NodeType::Max,
        );
        if searcher.stopped {
            outcome.stopped = true;
            break;
        }

        let line = searcher.table.line().to_vec();
        debug!(
            depth,
            score,
            nodes = searcher.nodes,
            pv = ?line,
            "iteration complete"
        );

        outcome.best_move = line.first().copied().or(outcome.best_move);
        outcome.score = score;
        outcome.depth = depth;
        searcher.hint.clone_from(&line);
        outcome.pv = line;

        if is_mate_score(score) {
            break;
        }
    }

    outcome.nodes = searcher.nodes;
    outcome
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
