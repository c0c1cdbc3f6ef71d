//! Attack and check detection.
//!
//! These are primitives used by the legality filter, castling generation, and
//! check extensions, so they read the board directly and never call back into
//! move generation.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::jump_tables::{king_targets, knight_targets, pawn_capture_targets, squares_in};
use crate::moves::sliding_rays::{is_diagonal, ray, ALL_DIRECTIONS};

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}

/// True iff any piece of `attacker_color` could move to `square`, ignoring pins.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let holds = |sq: Square, kind: PieceKind| {
        game_state.piece_at(sq) == Some(Piece::new(attacker_color, kind))
    };

    // An attacking pawn sits where a defending pawn on `square` would capture.
    if squares_in(pawn_capture_targets(attacker_color.opposite(), square))
        .any(|sq| holds(sq, PieceKind::Pawn))
    {
        return true;
    }

    if squares_in(knight_targets(square)).any(|sq| holds(sq, PieceKind::Knight)) {
        return true;
    }

    if squares_in(king_targets(square)).any(|sq| holds(sq, PieceKind::King)) {
        return true;
    }

    for direction in ALL_DIRECTIONS {
        let Some(blocker) = ray(square, direction).find_map(|sq| game_state.piece_at(sq)) else {
            continue;
        };
        if blocker.color != attacker_color {
            continue;
        }
        let slides_here = if is_diagonal(direction) {
            matches!(blocker.kind, PieceKind::Bishop | PieceKind::Queen)
        } else {
            matches!(blocker.kind, PieceKind::Rook | PieceKind::Queen)
        };
        if slides_here {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::{is_king_in_check, is_square_attacked};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn pawn_attacks_depend_on_color() {
        let game = GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("d5"), Color::Light));
        assert!(is_square_attacked(&game, sq("e4"), Color::Dark));
        assert!(!is_square_attacked(&game, sq("e5"), Color::Light));
        assert!(!is_square_attacked(&game, sq("d3"), Color::Light));
    }

    #[test]
    fn sliders_stop_at_first_blocker() {
        let game = GameState::from_fen("4k3/8/8/8/R2N3p/8/8/4K2B w - - 0 1")
            .expect("FEN should parse");
        assert!(is_square_attacked(&game, sq("c4"), Color::Light));
        assert!(!is_square_attacked(&game, sq("f4"), Color::Light));
        assert!(is_square_attacked(&game, sq("a8"), Color::Light));
        assert!(is_square_attacked(&game, sq("d5"), Color::Light));
        assert!(!is_square_attacked(&game, sq("g4"), Color::Dark));
    }

    #[test]
    fn knight_and_king_attacks() {
        let game = GameState::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(is_king_in_check(&game, Color::Light));
        assert!(!is_king_in_check(&game, Color::Dark));
        assert!(is_square_attacked(&game, sq("d7"), Color::Dark));
        assert!(is_square_attacked(&game, sq("d2"), Color::Light));
    }

    #[test]
    fn rook_on_diagonal_does_not_attack() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/1r6/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(!is_square_attacked(&game, sq("c3"), Color::Dark));
        assert!(is_square_attacked(&game, sq("e2"), Color::Dark));
        assert!(!is_king_in_check(&game, Color::Light));
    }
}
