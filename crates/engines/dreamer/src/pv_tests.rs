use super::*;
use dreamer_core::parse_uci_move;

fn line(board: &Board, moves: &[&str]) -> Vec<Move> {
    let mut pos = *board;
    moves
        .iter()
        .map(|txt| {
            let mv = parse_uci_move(&pos, txt).unwrap();
            pos.make_move(mv);
            mv
        })
        .collect()
}

#[test]
fn test_table_builds_line_bottom_up() {
    let board = Board::startpos();
    let moves = line(&board, &["e2e4", "e7e5", "g1f3"]);
    let mut table = PvTable::new();

    table.start_node(0);
    table.start_node(1);
    table.start_node(2);
    table.start_node(3);
    table.update(2, moves[2]);
    table.update(1, moves[1]);
    table.update(0, moves[0]);
    assert_eq!(table.line(), &moves[..]);

    // A new best move at the root whose child line is empty.
    table.start_node(1);
    table.update(0, moves[1]);
    assert_eq!(table.line(), &[moves[1]]);
}

#[test]
fn test_line_from_walks_the_stored_line() {
    let root = Board::startpos();
    let moves = line(&root, &["e2e4", "e7e5", "g1f3", "b8c6"]);
    let pv = PrincipalVariation::new(&root, moves.clone());
    assert_eq!(pv.ponder_move(), Some(moves[1]));

    assert_eq!(pv.line_from(&root), &moves[..]);

    let mut two_plies = root;
    two_plies.make_move(moves[0]);
    two_plies.make_move(moves[1]);
    assert_eq!(pv.line_from(&two_plies), &moves[2..]);

    let off_line = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(pv.line_from(&off_line).is_empty());
}

#[test]
fn test_clear_forgets_everything() {
    let root = Board::startpos();
    let mut pv = PrincipalVariation::new(&root, line(&root, &["d2d4"]));
    assert!(!pv.is_empty());
    pv.clear();
    assert!(pv.is_empty());
    assert!(pv.line_from(&root).is_empty());
    assert_eq!(pv.ponder_move(), None);
}
