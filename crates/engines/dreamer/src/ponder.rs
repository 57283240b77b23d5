//! Thinking on the opponent's time.
//!
//! After the engine moves, the second move of its principal variation is
//! the reply it expects. [`Dreamer::ponder`] plays that reply on a copy of
//! the board and keeps searching on a worker thread. The remembered line
//! moves into the worker and only comes back when the worker is joined, so
//! nothing else can read or clear it meanwhile.

use std::thread::{self, JoinHandle};

use dreamer_core::{Board, Move, MoveGenerator, SearchResult, TimeControl};
use tracing::{debug, info, warn};

use crate::eval::Evaluator;
use crate::pv::PrincipalVariation;
use crate::search::{self, SearchOutcome};
use crate::Dreamer;

struct PonderReport {
    pv: PrincipalVariation,
    outcome: SearchOutcome,
}

/// A running ponder search. Hand it back through
/// [`Dreamer::stop_ponder`] or [`Dreamer::resume_after_ponder`].
pub struct PonderHandle {
    predicted: Move,
    board: Board,
    time_control: TimeControl,
    task: JoinHandle<PonderReport>,
}

impl PonderHandle {
    /// Opponent move the search assumes.
    pub fn predicted(&self) -> Move {
        self.predicted
    }

    /// Position being searched: the one after the predicted move.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True once the worker has searched to full depth on its own.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[derive(Debug, Clone)]
pub enum PonderOutcome {
    /// The opponent played the predicted move; the result is the ponder
    /// search's answer to it.
    Hit(SearchResult),
    /// Something else was played and the ponder result was discarded.
    Miss,
}

impl<G, E> Dreamer<G, E>
where
    G: MoveGenerator + Clone + Send + 'static,
    E: Evaluator + Clone + Send + 'static,
{
    /// Start pondering. `board` is the position after the engine's own
    /// move, with the opponent to move.
    ///
    /// Returns `None` when pondering is disabled, there is no predicted
    /// reply, or the prediction is not legal in `board`.
    pub fn ponder(&mut self, board: &Board) -> Option<PonderHandle> {
        if !self.config.ponder {
            return None;
        }
        let predicted = self.pv.line_from(board).first().copied()?;
        if !self.is_legal(board, predicted) {
            debug!(?predicted, "predicted reply is not legal here");
            return None;
        }

        let mut pondered = *board;
        pondered.make_move(predicted);

        let pv = std::mem::take(&mut self.pv);
        let generator = self.generator.clone();
        let evaluator = self.evaluator.clone();
        let depth = self.config.depth;

        // Started here so a stop issued right after spawning is not undone.
        let time_control = TimeControl::new(None);
        time_control.start();
        let worker_tc = time_control.clone();

        let spawned = thread::Builder::new()
            .name("dreamer-ponder".to_string())
            .spawn(move || {
                let hint = pv.line_from(&pondered).to_vec();
                let outcome =
                    search::iterate(&generator, &evaluator, &pondered, depth, &worker_tc, &hint);
                PonderReport { pv, outcome }
            });

        match spawned {
            Ok(task) => {
                debug!(?predicted, "pondering");
                Some(PonderHandle {
                    predicted,
                    board: pondered,
                    time_control,
                    task,
                })
            }
            Err(e) => {
                warn!("failed to start ponder thread: {e}");
                None
            }
        }
    }

    /// Stop the ponder search once the opponent has played `actual`.
    ///
    /// On a hit the engine adopts the ponder line; on a miss its
    /// principal variation is cleared.
    pub fn stop_ponder(&mut self, handle: PonderHandle, actual: Move) -> PonderOutcome {
        handle.time_control.stop();
        let report = match handle.task.join() {
            Ok(report) => report,
            Err(_) => {
                warn!("ponder thread panicked");
                self.pv_clear();
                return PonderOutcome::Miss;
            }
        };

        if actual == handle.predicted {
            info!(predicted = ?handle.predicted, depth = report.outcome.depth, "ponder hit");
            let result = self.finish(&handle.board, report.outcome, Some(report.pv));
            PonderOutcome::Hit(result)
        } else {
            info!(predicted = ?handle.predicted, ?actual, "ponder miss");
            self.pv_clear();
            PonderOutcome::Miss
        }
    }

    /// Stop pondering, then search `board` (the position after `actual`)
    /// and return the move to play.
    pub fn resume_after_ponder(&mut self, handle: PonderHandle, board: &Board, actual: Move) -> Move {
        self.stop_ponder(handle, actual);
        self.find_best_move(board)
    }

    fn is_legal(&self, board: &Board, mv: Move) -> bool {
        if !mv.is_regular() {
            return false;
        }
        let mut moves = Vec::with_capacity(64);
        self.generator.generate(board, &mut moves);
        if !moves.contains(&mv) {
            return false;
        }
        let mut probe = *board;
        probe.make_move(mv);
        !probe.king_capturable()
    }
}

#[cfg(test)]
#[path = "ponder_tests.rs"]
mod ponder_tests;
