use super::*;
use crate::fen::STARTPOS_FEN;
use crate::movegen::legal_moves;
use crate::types::coord_to_sq;

fn at(coord: &str) -> u8 {
    coord_to_sq(coord).unwrap()
}

fn quiet(piece: Piece, from: &str, to: &str) -> Move {
    Move::new(piece, at(from), at(to), MoveKind::Normal, None)
}

fn assert_derived_state(board: &Board) {
    assert_eq!(board.hash_key, board.hash_from_scratch(), "hash drifted");
    let (material, pawns) = board.material_from_scratch();
    assert_eq!(board.material_value, material, "material drifted");
    assert_eq!(board.num_pawns, pawns, "pawn count drifted");
}

fn make_unmake(board: &mut Board, mv: Move) {
    let before = *board;
    let saved = board.irreversible();
    board.make_move(mv);
    assert_derived_state(board);
    board.unmake_move(mv, saved.en_passant, saved.castle_flags, saved.fifty_moves);
    assert_eq!(*board, before, "unmake of {mv:?} did not restore the board");
}

#[test]
fn test_startpos_fields() {
    let board = Board::startpos();
    assert_eq!(board.occupied().popcount(), 32);
    assert_eq!(board.material_value, [4000, 4000]);
    assert_eq!(board.num_pawns, [8, 8]);
    assert_eq!(board.castle_flags, CastleFlags::ALL_RIGHTS);
    assert!(board.en_passant.is_empty());
    assert_eq!(board.current_player, Color::White);
    assert_eq!(board.fifty_moves, 0);
    assert_eq!(board.fullmove_number, 1);
    assert_eq!(board.to_fen(), STARTPOS_FEN);
    assert_derived_state(&board);
}

#[test]
fn test_clear_empties_everything() {
    let mut board = Board::startpos();
    board.clear();
    assert!(board.occupied().is_empty());
    assert_eq!(board.hash_key, 0);
    assert_eq!(board.material_value, [0, 0]);
    assert_eq!(board.castle_flags, CastleFlags::empty());
    assert_eq!(board.fullmove_number, 1);
}

#[test]
fn test_aggregates_match_piece_masks() {
    let board = Board::startpos();
    for color in Color::BOTH {
        let union = PieceKind::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &kind| acc | board.pieces(Piece::new(kind, color)));
        assert_eq!(board.all(color), union);
    }
}

#[test]
fn test_double_push_without_capturer_leaves_no_en_passant() {
    let mut board = Board::startpos();

    board.make_move(quiet(Piece::WHITE_PAWN, "e2", "e4"));
    assert!(board.en_passant.is_empty());
    assert_eq!(board.fifty_moves, 0);

    board.make_move(quiet(Piece::BLACK_PAWN, "d7", "d5"));
    assert!(board.en_passant.is_empty());
    assert_eq!(board.fifty_moves, 0);
    assert_eq!(board.fullmove_number, 2);
    assert_derived_state(&board);
}

#[test]
fn test_en_passant_removes_the_pushed_pawn() {
    let mut board = Board::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap();

    board.make_move(quiet(Piece::WHITE_PAWN, "e2", "e4"));
    assert_eq!(board.en_passant, Bitboard::from_square(at("e3")));
    assert_derived_state(&board);

    let ep = Move::new(
        Piece::BLACK_PAWN,
        at("d4"),
        at("e3"),
        MoveKind::EnPassant,
        Some(Piece::WHITE_PAWN),
    );
    let before = board;
    let saved = board.irreversible();
    board.make_move(ep);

    assert!(board.pieces(Piece::WHITE_PAWN).is_empty());
    assert_eq!(board.piece_at(at("e3")), Some(Piece::BLACK_PAWN));
    assert_eq!(board.piece_at(at("e4")), None);
    assert_eq!(board.num_pawns, [0, 1]);
    assert!(board.en_passant.is_empty());
    assert_derived_state(&board);

    board.unmake_move(ep, saved.en_passant, saved.castle_flags, saved.fifty_moves);
    assert_eq!(board, before);
}

#[test]
fn test_promotion_changes_material_and_pawns() {
    let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 7 40").unwrap();
    let promo = Move::new(Piece::WHITE_QUEEN, at("a7"), at("a8"), MoveKind::Promotion, None);

    board.make_move(promo);
    assert_eq!(board.material_value[Color::White.idx()], 900);
    assert_eq!(board.num_pawns[Color::White.idx()], 0);
    assert_eq!(board.piece_at(at("a8")), Some(Piece::WHITE_QUEEN));
    assert_eq!(board.fifty_moves, 0);
    assert_derived_state(&board);
}

#[test]
fn test_promotion_capture_round_trip() {
    let mut board = Board::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 3 30").unwrap();
    let promo = Move::new(
        Piece::WHITE_KNIGHT,
        at("a7"),
        at("b8"),
        MoveKind::PromotionCapture,
        Some(Piece::BLACK_ROOK),
    );
    make_unmake(&mut board, promo);

    board.make_move(promo);
    assert_eq!(board.material_value, [320, 0]);
    assert!(board.pieces(Piece::BLACK_ROOK).is_empty());
}

#[test]
fn test_castle_moves_rook_and_sets_has_castled() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = Move::new(
        Piece::WHITE_KING,
        SQUARE_E1,
        SQUARE_G1,
        MoveKind::KingsideCastle,
        None,
    );
    make_unmake(&mut board, castle);

    board.make_move(castle);
    assert_eq!(board.piece_at(SQUARE_G1), Some(Piece::WHITE_KING));
    assert_eq!(board.piece_at(SQUARE_F1), Some(Piece::WHITE_ROOK));
    assert_eq!(board.piece_at(SQUARE_H1), None);
    assert!(!board.castle_flags.can_castle(Color::White, CastleWing::Kingside));
    assert!(!board.castle_flags.can_castle(Color::White, CastleWing::Queenside));
    assert!(board.castle_flags.has_castled(Color::White));
    assert!(board.castle_flags.can_castle(Color::Black, CastleWing::Queenside));
    assert_eq!(board.fifty_moves, 1);
}

#[test]
fn test_rook_capture_revokes_both_corners() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let capture = Move::new(
        Piece::WHITE_ROOK,
        SQUARE_A1,
        SQUARE_A8,
        MoveKind::Capture,
        Some(Piece::BLACK_ROOK),
    );
    board.make_move(capture);

    assert!(!board.castle_flags.can_castle(Color::White, CastleWing::Queenside));
    assert!(!board.castle_flags.can_castle(Color::Black, CastleWing::Queenside));
    assert!(board.castle_flags.can_castle(Color::White, CastleWing::Kingside));
    assert!(board.castle_flags.can_castle(Color::Black, CastleWing::Kingside));
    assert_derived_state(&board);
}

#[test]
fn test_phantom_kings_are_reported_before_rooks() {
    let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = Move::new(
        Piece::WHITE_KING,
        SQUARE_E1,
        SQUARE_G1,
        MoveKind::KingsideCastle,
        None,
    );

    let mut probe = board;
    probe.make_move(castle);
    probe.place_phantom_kings(Color::White, CastleWing::Kingside);

    assert_eq!(probe.find_piece(Color::White, SQUARE_F1), Some(Piece::WHITE_KING));
    assert_eq!(probe.find_piece(Color::White, SQUARE_E1), Some(Piece::WHITE_KING));
    assert!(probe.castle_flags.contains(CastleFlags::WHITE_PHANTOM_KINGSIDE));
    assert!(!probe.king_capturable());

    // The probe is a copy.
    assert_eq!(board.pieces(Piece::WHITE_KING).popcount(), 1);
    assert!(!board.castle_flags.contains(CastleFlags::WHITE_PHANTOM_KINGSIDE));
}

#[test]
fn test_is_attacked_and_in_check() {
    let board = Board::from_fen("4k3/8/8/8/8/8/3n4/4K3 w - - 0 1").unwrap();
    assert!(board.is_attacked(SQUARE_F1, Color::Black));
    assert!(board.is_attacked(at("b1"), Color::Black));
    assert!(!board.in_check(Color::White));

    let checked = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
    assert!(checked.in_check(Color::White));
    assert!(!checked.king_capturable());
}

#[test]
fn test_non_regular_moves_are_ignored() {
    let mut board = Board::startpos();
    let before = board;
    for mv in [Move::NONE, Move::resign(Color::White), Move::stalemate()] {
        board.make_move(mv);
        assert_eq!(board, before);
        board.unmake_move(mv, Bitboard::EMPTY, CastleFlags::empty(), 0);
        assert_eq!(board, before);
    }
}

#[test]
fn test_fifty_move_counter() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
    assert!(!board.is_fifty_move_draw());
    board.make_move(quiet(Piece::WHITE_ROOK, "a1", "a2"));
    assert_eq!(board.fifty_moves, 100);
    assert!(board.is_fifty_move_draw());
}

#[test]
fn test_make_unmake_every_legal_move() {
    let fens = [
        STARTPOS_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let mut board = Board::from_fen(fen).unwrap();
        for mv in legal_moves(&board) {
            make_unmake(&mut board, mv);
        }
    }
}

#[test]
fn test_display_draws_ranks_top_down() {
    let text = Board::startpos().to_string();
    let first = text.lines().next().unwrap();
    assert_eq!(first, "8  r n b q k b n r");
    assert!(text.ends_with("   a b c d e f g h\n"));
}
