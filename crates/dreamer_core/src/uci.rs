use crate::{
    board::Board,
    error::UciError,
    movegen::legal_moves,
    moves::Move,
    types::*,
};

/// Coordinate notation (`e2e4`, `e7e8q`). Non-regular moves print as the
/// UCI null move `0000`.
pub fn move_to_uci(mv: Move) -> String {
    if !mv.is_regular() {
        return "0000".to_string();
    }
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.source()));
    s.push_str(&sq_to_coord(mv.dest()));
    if mv.does_promotion() {
        s.push(mv.piece_kind().to_char());
    }
    s
}

/// Find the legal move written as `txt`. A promotion without a suffix
/// letter is read as a queen promotion.
pub fn parse_uci_move(board: &Board, txt: &str) -> Option<Move> {
    // Matched against legal moves so castle/en-passant kinds come out right.
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt[4..].chars().next() {
        Some(ch) => Some(PieceKind::from_char(ch).filter(|k| PieceKind::PROMOTIONS.contains(k))?),
        None => None,
    };

    legal_moves(board).into_iter().find(|m| {
        m.source() == from
            && m.dest() == to
            && (!m.does_promotion() || m.piece_kind() == promo.unwrap_or(PieceKind::Queen))
    })
}

/// Apply the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// On error the board may hold the position reached before the bad move.
pub fn set_position_from_uci(board: &mut Board, args: &[&str]) -> Result<(), UciError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    match setup.split_first() {
        Some((&"startpos", [])) => board.setup(),
        Some((&"fen", fields)) if !fields.is_empty() => board.setup_fen(&fields.join(" "))?,
        _ => return Err(UciError::MalformedPosition(args.join(" "))),
    }

    for &txt in moves.iter().skip(1) {
        let mv = parse_uci_move(board, txt).ok_or_else(|| UciError::IllegalMove(txt.to_string()))?;
        board.make_move(mv);
    }
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
