//! Dreamer Chess Engine
//!
//! Alpha-beta minimax over pseudo-legal moves with iterative deepening,
//! principal variation reuse between searches and pondering on the
//! opponent's expected reply.

pub mod config;
pub mod eval;
pub mod ponder;
pub mod pv;
pub mod search;

use dreamer_core::{BitboardMoveGen, Board, Engine, Move, MoveGenerator, SearchLimits, SearchResult};
use tracing::info;

pub use config::{ConfigError, EngineConfig};
pub use eval::{Evaluator, MaterialEvaluator};
pub use ponder::{PonderHandle, PonderOutcome};
pub use pv::PrincipalVariation;
pub use search::{RootState, SearchOutcome};

/// The engine: a move generator, an evaluator, settings, and the
/// principal variation remembered from the last search.
#[derive(Debug, Clone, Default)]
pub struct Dreamer<G = BitboardMoveGen, E = MaterialEvaluator> {
    generator: G,
    evaluator: E,
    config: EngineConfig,
    pv: PrincipalVariation,
}

impl Dreamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl<G: MoveGenerator, E: Evaluator> Dreamer<G, E> {
    pub fn with_strategies(generator: G, evaluator: E, config: EngineConfig) -> Self {
        Self {
            generator,
            evaluator,
            config,
            pv: PrincipalVariation::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pv(&self) -> &PrincipalVariation {
        &self.pv
    }

    /// Forget the remembered line, e.g. for a new game.
    pub fn pv_clear(&mut self) {
        self.pv.clear();
    }

    /// Search with the configured limits and return the move to play.
    ///
    /// Returns [`Move::NONE`] when checkmated, [`Move::stalemate`] when
    /// stalemated and [`Move::resign`] when the best line scores below
    /// the resign threshold.
    pub fn find_best_move(&mut self, board: &Board) -> Move {
        let limits = self.config.limits();
        self.run(board, limits).best_move
    }

    fn run(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        limits.start();
        let hint = self.pv.line_from(board).to_vec();
        let outcome = search::iterate(
            &self.generator,
            &self.evaluator,
            board,
            limits.depth,
            &limits.time_control,
            &hint,
        );
        self.finish(board, outcome, None)
    }

    /// Turn a search outcome into the move to play and remember its line.
    /// Without a new line, `previous` (if any) is kept instead.
    fn finish(
        &mut self,
        board: &Board,
        outcome: SearchOutcome,
        previous: Option<PrincipalVariation>,
    ) -> SearchResult {
        let side = board.current_player;
        let best_move = match outcome.root {
            RootState::Checkmated => Move::NONE,
            RootState::Stalemated => Move::stalemate(),
            RootState::Playable => match (self.config.resign_threshold, outcome.best_move) {
                (Some(threshold), _) if outcome.depth > 0 && outcome.score < threshold => {
                    Move::resign(side)
                }
                (_, Some(mv)) => mv,
                (_, None) => Move::NONE,
            },
        };

        if !outcome.pv.is_empty() {
            self.pv = PrincipalVariation::new(board, outcome.pv.clone());
        } else if let Some(previous) = previous {
            self.pv = previous;
        }

        info!(
            best = ?best_move,
            score = outcome.score,
            depth = outcome.depth,
            nodes = outcome.nodes,
            stopped = outcome.stopped,
            "search finished"
        );

        SearchResult {
            best_move,
            score: outcome.score,
            depth: outcome.depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
            pv: outcome.pv,
        }
    }
}

impl<G, E> Engine for Dreamer<G, E>
where
    G: MoveGenerator + Send,
    E: Evaluator + Send,
{
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        self.run(board, limits)
    }

    fn name(&self) -> &str {
        "Dreamer"
    }

    fn new_game(&mut self) {
        self.pv_clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim();
        let mut next = self.config.clone();
        match name.to_ascii_lowercase().as_str() {
            "depth" => match value.parse() {
                Ok(depth) => next.depth = depth,
                Err(_) => return false,
            },
            "ponder" => match value.parse() {
                Ok(on) => next.ponder = on,
                Err(_) => return false,
            },
            "movetime" => match value.parse::<u64>() {
                Ok(0) => next.move_time_ms = None,
                Ok(ms) => next.move_time_ms = Some(ms),
                Err(_) => return false,
            },
            "resignthreshold" => match value {
                "none" | "off" => next.resign_threshold = None,
                _ => match value.parse() {
                    Ok(score) => next.resign_threshold = Some(score),
                    Err(_) => return false,
                },
            },
            _ => return false,
        }
        if next.validate().is_err() {
            return false;
        }
        self.config = next;
        true
    }
}

#[cfg(test)]
#[path = "dreamer_tests.rs"]
mod dreamer_tests;
