use crate::game_state::chess_rules::king_castling_rights;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_moves_knight::push_jump_moves;
use crate::moves::jump_tables::king_targets;
use crate::moves::move_descriptions::{Move, FLAG_CASTLING};

struct CastlePath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    must_be_empty: &'static [Square],
    must_be_safe: [Square; 2],
}

const CASTLE_PATHS: [CastlePath; 4] = [
    CastlePath {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        must_be_empty: &[5, 6],
        must_be_safe: [5, 6],
    },
    CastlePath {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        must_be_empty: &[1, 2, 3],
        must_be_safe: [3, 2],
    },
    CastlePath {
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        must_be_empty: &[61, 62],
        must_be_safe: [61, 62],
    },
    CastlePath {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        must_be_empty: &[57, 58, 59],
        must_be_safe: [59, 58],
    },
];

pub fn generate_king_moves(
    game_state: &GameState,
    from: Square,
    captures_only: bool,
    out: &mut Vec<Move>,
) {
    push_jump_moves(game_state, from, king_targets(from), captures_only, out);
    if !captures_only {
        generate_castling_moves(game_state, from, out);
    }
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let own_rights = king_castling_rights(side);

    if game_state.castling_rights & own_rights == 0 {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    for path in CASTLE_PATHS
        .iter()
        .filter(|path| path.right & own_rights != 0 && path.king_from == king_from)
    {
        if game_state.castling_rights & path.right == 0 {
            continue;
        }
        if path
            .must_be_empty
            .iter()
            .any(|sq| game_state.piece_at(*sq).is_some())
        {
            continue;
        }
        if path
            .must_be_safe
            .iter()
            .any(|sq| is_square_attacked(game_state, *sq, enemy))
        {
            continue;
        }
        out.push(Move::new(path.king_from, path.king_to, None, None, FLAG_CASTLING));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    fn castles(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let from = game.king_square(game.side_to_move);
        let mut out = Vec::new();
        generate_king_moves(&game, from, false, &mut out);
        let mut lans: Vec<String> = out
            .iter()
            .filter(|mv| mv.is_castling())
            .map(move_to_long_algebraic)
            .collect();
        lans.sort();
        lans
    }

    #[test]
    fn both_sides_available_when_clear() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["e1c1", "e1g1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["e8c8", "e8g8"]);
    }

    #[test]
    fn no_castling_through_attacked_square_or_out_of_check() {
        // Rook on f8 covers f1.
        assert_eq!(castles("1k3r2/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec!["e1c1"]);
        // Rook on e8 gives check.
        assert!(castles("1k2r3/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn queenside_needs_b_file_empty_but_not_safe() {
        // b1 attacked is fine, b1 occupied is not.
        assert_eq!(castles("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1"), vec!["e1c1"]);
        assert!(castles("7k/8/8/8/8/8/8/RN2K3 w Q - 0 1").is_empty());
    }

    #[test]
    fn missing_rights_disable_castling() {
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1").is_empty());
    }
}
