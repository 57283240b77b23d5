use super::*;
use dreamer_core::{Color, MoveKind};

fn engine(depth: u8) -> Dreamer {
    Dreamer::with_config(EngineConfig {
        depth,
        ..EngineConfig::default()
    })
}

#[test]
fn test_checkmated_returns_none_move() {
    let board = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    let mv = engine(3).find_best_move(&board);
    assert!(mv.is_none());
}

#[test]
fn test_stalemated_returns_stalemate_marker() {
    let board = Board::from_fen("7k/8/8/8/8/1q6/8/K7 w - - 0 1").unwrap();
    let mv = engine(3).find_best_move(&board);
    assert_eq!(mv.kind(), MoveKind::Stalemate);
    assert!(!mv.is_regular());
}

#[test]
fn test_resigns_below_threshold() {
    let board = Board::from_fen("3qk2r/8/8/8/8/8/8/4K3 w k - 0 1").unwrap();
    let mut dreamer = Dreamer::with_config(EngineConfig {
        depth: 2,
        resign_threshold: Some(-500),
        ..EngineConfig::default()
    });
    let mv = dreamer.find_best_move(&board);
    assert_eq!(mv.kind(), MoveKind::Resign);
    assert_eq!(mv.piece_colour(), Color::White);
}

#[test]
fn test_plays_on_without_threshold() {
    let board = Board::from_fen("3qk2r/8/8/8/8/8/8/4K3 w k - 0 1").unwrap();
    let mv = engine(2).find_best_move(&board);
    assert!(mv.is_regular());
    assert_eq!(mv.piece_colour(), Color::White);
}

#[test]
fn test_remembers_line_until_cleared() {
    let board = Board::startpos();
    let mut dreamer = engine(3);
    let mv = dreamer.find_best_move(&board);
    assert!(mv.is_regular());
    assert_eq!(dreamer.pv().moves().first(), Some(&mv));
    assert!(dreamer.pv().ponder_move().is_some());

    dreamer.pv_clear();
    assert!(dreamer.pv().is_empty());
}

#[test]
fn test_new_game_forgets_line() {
    let board = Board::startpos();
    let mut dreamer = engine(2);
    dreamer.find_best_move(&board);
    assert!(!dreamer.pv().is_empty());

    dreamer.new_game();
    assert!(dreamer.pv().is_empty());
}

#[test]
fn test_engine_search_reports_line() {
    let board = Board::startpos();
    let mut dreamer = Dreamer::new();
    let result = dreamer.search(&board, SearchLimits::depth(2));
    assert_eq!(dreamer.name(), "Dreamer");
    assert_eq!(result.depth, 2);
    assert!(!result.stopped);
    assert_eq!(result.pv.first(), Some(&result.best_move));
    assert_eq!(result.ponder_move(), dreamer.pv().ponder_move());
}

#[test]
fn test_set_option() {
    let mut dreamer = Dreamer::new();

    assert!(dreamer.set_option("Depth", "6"));
    assert_eq!(dreamer.config().depth, 6);
    assert!(!dreamer.set_option("Depth", "0"));
    assert!(!dreamer.set_option("Depth", "40"));
    assert!(!dreamer.set_option("Depth", "deep"));
    assert_eq!(dreamer.config().depth, 6);

    assert!(dreamer.set_option("Ponder", "false"));
    assert!(!dreamer.config().ponder);

    assert!(dreamer.set_option("MoveTime", "250"));
    assert_eq!(dreamer.config().move_time_ms, Some(250));
    assert!(dreamer.set_option("MoveTime", "0"));
    assert_eq!(dreamer.config().move_time_ms, None);

    assert!(dreamer.set_option("ResignThreshold", "-800"));
    assert_eq!(dreamer.config().resign_threshold, Some(-800));
    assert!(dreamer.set_option("ResignThreshold", "none"));
    assert_eq!(dreamer.config().resign_threshold, None);

    assert!(!dreamer.set_option("Hash", "64"));
}
