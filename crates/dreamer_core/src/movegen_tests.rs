use super::*;
use crate::types::coord_to_sq;

fn at(coord: &str) -> u8 {
    coord_to_sq(coord).unwrap()
}

fn has_castle(moves: &[Move], kind: MoveKind) -> bool {
    moves.iter().any(|m| m.kind() == kind)
}

#[test]
fn test_startpos_moves() {
    let board = Board::startpos();
    let moves = legal_moves(&board);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&board);
    assert_eq!(moves.len(), 48);
    assert!(has_castle(&moves, MoveKind::KingsideCastle));
    assert!(has_castle(&moves, MoveKind::QueensideCastle));
}

#[test]
fn test_trait_generator_matches_free_function() {
    let board = Board::startpos();
    let mut via_trait = Vec::new();
    BitboardMoveGen.generate(&board, &mut via_trait);
    let mut direct = Vec::new();
    pseudo_moves(&board, &mut direct);
    assert_eq!(via_trait, direct);
}

#[test]
fn test_cannot_castle_through_attacked_square() {
    // Black rook on f8 covers f1.
    let board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&board);
    assert!(!has_castle(&moves, MoveKind::KingsideCastle));
    assert!(has_castle(&moves, MoveKind::QueensideCastle));
    assert!(castle_passes_through_check(board, Color::White, CastleWing::Kingside));
}

#[test]
fn test_cannot_castle_into_check() {
    // Rook on g8 covers the kingside landing square.
    let board = Board::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&board);
    assert!(!has_castle(&moves, MoveKind::KingsideCastle));
    assert!(has_castle(&moves, MoveKind::QueensideCastle));
    assert!(castle_passes_through_check(board, Color::White, CastleWing::Kingside));

    // Rook on c8 covers the queenside landing square.
    let board = Board::from_fen("2r1k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&board);
    assert!(!has_castle(&moves, MoveKind::QueensideCastle));
    assert!(has_castle(&moves, MoveKind::KingsideCastle));
}

#[test]
fn test_cannot_castle_out_of_check() {
    let board = Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&board);
    assert!(!has_castle(&moves, MoveKind::KingsideCastle));
    assert!(!has_castle(&moves, MoveKind::QueensideCastle));
}

#[test]
fn test_queenside_b_file_attack_does_not_block() {
    // Only b1 is attacked; the king never crosses it.
    let board = Board::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    let moves = legal_moves(&board);
    assert!(has_castle(&moves, MoveKind::QueensideCastle));
}

#[test]
fn test_castle_probe_does_not_touch_board() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = board;
    for wing in CastleWing::BOTH {
        assert!(!castle_passes_through_check(board, Color::White, wing));
    }
    assert_eq!(board, before);
}

#[test]
fn test_promotions_cover_four_pieces() {
    let board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&board);
    let pushes = moves
        .iter()
        .filter(|m| m.kind() == MoveKind::Promotion)
        .count();
    let captures: Vec<_> = moves
        .iter()
        .filter(|m| m.kind() == MoveKind::PromotionCapture)
        .collect();
    assert_eq!(pushes, 4);
    assert_eq!(captures.len(), 4);
    assert!(captures
        .iter()
        .all(|m| m.captured_piece() == Some(Piece::BLACK_KNIGHT) && m.dest() == at("b8")));
}

#[test]
fn test_en_passant_generated_after_double_push() {
    let mut with_pawn = Board::from_fen("4k3/4p3/8/3P4/8/8/8/4K3 b - - 0 1").unwrap();
    assert!(legal_moves(&with_pawn).iter().all(|m| m.kind() != MoveKind::EnPassant));

    with_pawn.make_move(Move::new(
        Piece::BLACK_PAWN,
        at("e7"),
        at("e5"),
        MoveKind::Normal,
        None,
    ));
    let ep: Vec<_> = legal_moves(&with_pawn)
        .into_iter()
        .filter(|m| m.kind() == MoveKind::EnPassant)
        .collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(ep[0].source(), at("d5"));
    assert_eq!(ep[0].dest(), at("e6"));
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 pinned by the rook on e8.
    let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&board);
    assert!(moves.iter().all(|m| m.piece() != Piece::WHITE_KNIGHT));
}

#[test]
fn test_legal_moves_into_restores_board() {
    let mut board =
        Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let before = board;
    let mut buf = vec![Move::NONE; 3];
    legal_moves_into(&mut board, &mut buf);
    assert_eq!(buf.len(), 48);
    assert_eq!(board, before);
}

#[test]
fn test_checkmate_and_stalemate_have_no_moves() {
    let mated = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(legal_moves(&mated).is_empty());
    assert!(mated.in_check(Color::Black));

    let stalemated = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(legal_moves(&stalemated).is_empty());
    assert!(!stalemated.in_check(Color::Black));
}
