use super::*;

#[test]
fn test_startpos_is_balanced() {
    assert_eq!(MaterialEvaluator.evaluate(&Board::startpos()), 0);
}

#[test]
fn test_mirrored_positions_negate() {
    let white_up = Board::from_fen("4k3/8/8/8/3N4/8/4P3/4K3 w - - 0 1").unwrap();
    let black_up = Board::from_fen("4k3/4p3/8/3n4/8/8/8/4K3 w - - 0 1").unwrap();
    let score = MaterialEvaluator.evaluate(&white_up);
    assert!(score > 400);
    assert_eq!(MaterialEvaluator.evaluate(&black_up), -score);
}

#[test]
fn test_score_is_from_whites_view() {
    let white = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
    let black_to_move = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();
    assert_eq!(
        MaterialEvaluator.evaluate(&white),
        MaterialEvaluator.evaluate(&black_to_move)
    );
    assert!(MaterialEvaluator.evaluate(&white) >= 900);
}

#[test]
fn test_centralised_knight_scores_higher() {
    let rim = Board::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
    let centre = Board::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
    assert!(MaterialEvaluator.evaluate(&centre) > MaterialEvaluator.evaluate(&rim));
}
