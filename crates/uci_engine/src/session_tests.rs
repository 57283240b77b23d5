use super::*;
use dreamer_core::{legal_moves, parse_uci_move};
use dreamer_engine::EngineConfig;

fn session(depth: u8) -> Session {
    Session::new(Dreamer::with_config(EngineConfig {
        depth,
        ..EngineConfig::default()
    }))
}

fn send(session: &mut Session, line: &str) -> String {
    let mut out = Vec::new();
    assert!(session.handle(line, &mut out).unwrap());
    String::from_utf8(out).unwrap()
}

fn bestmove(output: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = output.split_whitespace().collect();
    assert_eq!(parts.first(), Some(&"bestmove"), "output: {output}");
    let ponder = match parts.get(2) {
        Some(&"ponder") => parts.get(3).map(|s| s.to_string()),
        _ => None,
    };
    (parts[1].to_string(), ponder)
}

#[test]
fn test_handshake() {
    let mut s = session(2);
    let out = send(&mut s, "uci");
    assert!(out.starts_with("id name Dreamer\n"));
    assert!(out.contains("option name Depth type spin default 2 min 1 max 32"));
    assert!(out.ends_with("uciok\n"));
    assert_eq!(send(&mut s, "isready"), "readyok\n");
}

#[test]
fn test_go_answers_a_legal_move() {
    let mut s = session(2);
    send(&mut s, "position startpos moves e2e4");
    let (best, _) = bestmove(&send(&mut s, "go depth 2"));

    let mut board = Board::startpos();
    board.make_move(parse_uci_move(&board, "e2e4").unwrap());
    let mv = parse_uci_move(&board, &best).unwrap();
    assert!(legal_moves(&board).contains(&mv));
}

#[test]
fn test_mated_side_answers_null_move() {
    let mut s = session(2);
    send(&mut s, "position fen R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert_eq!(send(&mut s, "go"), "bestmove 0000\n");
    assert!(s.pondering.is_none());
}

#[test]
fn test_bad_position_keeps_previous_board() {
    let mut s = session(2);
    send(&mut s, "position startpos moves e2e4");
    let before = s.board;
    send(&mut s, "position startpos moves e2e5");
    assert_eq!(s.board.hash_key, before.hash_key);
}

#[test]
fn test_setoption() {
    let mut s = session(2);
    send(&mut s, "setoption name Depth value 5");
    assert_eq!(s.engine.config().depth, 5);
    send(&mut s, "setoption name Ponder value false");
    assert!(!s.engine.config().ponder);
    send(&mut s, "setoption name Depth value 99");
    assert_eq!(s.engine.config().depth, 5);
}

#[test]
fn test_ponders_after_bestmove_and_resolves_on_position() {
    let mut s = session(3);
    send(&mut s, "position startpos");
    let (best, ponder) = bestmove(&send(&mut s, "go"));
    let ponder = ponder.unwrap();
    assert!(s.pondering.is_some());

    send(&mut s, &format!("position startpos moves {best} {ponder}"));
    assert!(s.pondering.is_none());
    // Hit: the ponder line now continues from the new position.
    assert!(!s.engine.pv().line_from(&s.board).is_empty());

    let (reply, _) = bestmove(&send(&mut s, "go"));
    assert!(parse_uci_move(&s.board, &reply).is_some());
}

#[test]
fn test_unexpected_reply_is_a_miss() {
    let mut s = session(3);
    send(&mut s, "position startpos");
    let (best, ponder) = bestmove(&send(&mut s, "go"));
    let ponder = ponder.unwrap();

    let mut board = Board::startpos();
    board.make_move(parse_uci_move(&board, &best).unwrap());
    let other = legal_moves(&board)
        .into_iter()
        .map(move_to_uci)
        .find(|mv| *mv != ponder)
        .unwrap();

    send(&mut s, &format!("position startpos moves {best} {other}"));
    assert!(s.pondering.is_none());
    assert!(s.engine.pv().is_empty());
}

#[test]
fn test_quit() {
    let mut s = session(2);
    let mut out = Vec::new();
    assert!(!s.handle("quit", &mut out).unwrap());
    assert!(s.handle("", &mut out).unwrap());
}
