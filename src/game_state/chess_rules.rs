//! Canonical chess-rule constants.
//!
//! Stores static rule literals such as the standard starting position FEN and
//! the fixed squares involved in castling.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Home squares of the four castling rooks and the right each one guards.
pub const CASTLING_ROOK_HOMES: [(Square, CastlingRights); 4] = [
    (0, CASTLE_LIGHT_QUEENSIDE),
    (7, CASTLE_LIGHT_KINGSIDE),
    (56, CASTLE_DARK_QUEENSIDE),
    (63, CASTLE_DARK_KINGSIDE),
];

/// Rights lost when the king of `color` moves.
#[inline]
pub const fn king_castling_rights(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}

/// Rook relocation for a castling king move `(king_to) -> (rook_from, rook_to)`.
#[inline]
pub const fn castling_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        6 => Some((7, 5)),
        2 => Some((0, 3)),
        62 => Some((63, 61)),
        58 => Some((56, 59)),
        _ => None,
    }
}

/// Rank a pawn of `color` starts on (eligible for the double advance).
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}

/// Rank a pawn of `color` must stand on to capture en passant.
#[inline]
pub const fn en_passant_capture_rank(color: Color) -> u8 {
    match color {
        Color::Light => 4,
        Color::Dark => 3,
    }
}
