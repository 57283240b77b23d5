//! UCI command handling.
//!
//! The engine ponders on its own after every `bestmove`: the expected
//! reply is played on a copy of the board and searched until the next
//! `position` command tells us what the opponent really did.

use std::io::{self, Write};
use std::time::Duration;

use dreamer_core::{move_to_uci, set_position_from_uci, Board, Engine, Move, SearchLimits};
use dreamer_engine::search::MAX_DEPTH;
use dreamer_engine::{Dreamer, PonderHandle, PonderOutcome};
use tracing::{debug, info, warn};

pub struct Session {
    engine: Dreamer,
    board: Board,
    pondering: Option<PonderHandle>,
}

impl Session {
    pub fn new(engine: Dreamer) -> Self {
        Self {
            engine,
            board: Board::startpos(),
            pondering: None,
        }
    }

    /// Handle one input line. Returns `false` once the GUI asked to quit.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(true);
        };

        match command {
            "uci" => {
                let config = self.engine.config();
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author {}", self.engine.author())?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max {MAX_DEPTH}",
                    config.depth
                )?;
                writeln!(out, "option name Ponder type check default {}", config.ponder)?;
                writeln!(
                    out,
                    "option name MoveTime type spin default {} min 0 max 3600000",
                    config.move_time_ms.unwrap_or(0)
                )?;
                let threshold = config
                    .resign_threshold
                    .map_or_else(|| "none".to_string(), |t| t.to_string());
                writeln!(out, "option name ResignThreshold type string default {threshold}")?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(args),
            "ucinewgame" => {
                self.cancel_ponder();
                self.engine.new_game();
                self.board = Board::startpos();
            }
            "position" => self.position(args),
            "go" => self.go(args, out)?,
            "stop" => self.cancel_ponder(),
            "quit" => {
                self.cancel_ponder();
                return Ok(false);
            }
            _ => debug!(line, "ignoring unknown command"),
        }
        out.flush()?;
        Ok(true)
    }

    fn set_option(&mut self, args: &[&str]) {
        // setoption name <id> [value <x>]
        let name_at = args.iter().position(|&a| a == "name");
        let value_at = args.iter().position(|&a| a == "value");
        let Some(name_at) = name_at else {
            warn!("setoption without a name");
            return;
        };
        let name_end = value_at.unwrap_or(args.len());
        let name = args.get(name_at + 1..name_end).unwrap_or(&[]).join(" ");
        let value = value_at
            .map(|at| args[at + 1..].join(" "))
            .unwrap_or_default();

        if !self.engine.set_option(&name, &value) {
            warn!(name = %name, value = %value, "unsupported option or value");
        }
    }

    fn position(&mut self, args: &[&str]) {
        let mut board = self.board;
        if let Err(e) = set_position_from_uci(&mut board, args) {
            warn!("ignoring position command: {e}");
            return;
        }

        if let Some(handle) = self.pondering.take() {
            let actual = if handle.board().hash_key == board.hash_key {
                handle.predicted()
            } else {
                Move::NONE
            };
            if let PonderOutcome::Hit(result) = self.engine.stop_ponder(handle, actual) {
                debug!(depth = result.depth, "ponder search reused");
            }
        }
        self.board = board;
    }

    fn go(&mut self, args: &[&str], out: &mut impl Write) -> io::Result<()> {
        self.cancel_ponder();
        let limits = self.go_limits(args);
        let result = self.engine.search(&self.board, limits);
        let best = result.best_move;

        if !best.is_regular() {
            info!(?best, "no move to play");
            writeln!(out, "bestmove 0000")?;
            return Ok(());
        }

        match result.ponder_move() {
            Some(reply) => writeln!(out, "bestmove {} ponder {}", move_to_uci(best), move_to_uci(reply))?,
            None => writeln!(out, "bestmove {}", move_to_uci(best))?,
        }

        let mut after = self.board;
        after.make_move(best);
        self.pondering = self.engine.ponder(&after);
        Ok(())
    }

    /// Limits from `go` arguments, defaulting to the configured ones.
    fn go_limits(&self, args: &[&str]) -> SearchLimits {
        let config = self.engine.config();
        let mut depth = config.depth;
        let mut move_time = config.move_time_ms.map(Duration::from_millis);

        let mut tokens = args.iter();
        while let Some(&token) = tokens.next() {
            match token {
                "depth" => {
                    if let Some(d) = tokens.next().and_then(|v| v.parse::<u8>().ok()) {
                        depth = d.clamp(1, MAX_DEPTH);
                    }
                }
                "movetime" => {
                    if let Some(ms) = tokens.next().and_then(|v| v.parse::<u64>().ok()) {
                        move_time = Some(Duration::from_millis(ms));
                    }
                }
                _ => {}
            }
        }

        match move_time {
            Some(time) => SearchLimits::depth_and_time(depth, time),
            None => SearchLimits::depth(depth),
        }
    }

    fn cancel_ponder(&mut self) {
        if let Some(handle) = self.pondering.take() {
            self.engine.stop_ponder(handle, Move::NONE);
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
