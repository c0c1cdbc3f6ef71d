use crate::game_state::chess_rules::{en_passant_capture_rank, pawn_start_rank, promotion_rank};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::jump_tables::{pawn_capture_targets, squares_in};
use crate::moves::move_descriptions::{
    Move, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

/// Pawn advances, captures, en passant, and promotions for the pawn on `from`.
/// With `captures_only` the quiet advances are skipped but promotions stay.
pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    captures_only: bool,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let promotes_on = promotion_rank(side);

    if let Some(to) = offset_square(from, 0, side.pawn_direction()) {
        if game_state.piece_at(to).is_none() {
            if square_rank(to) == promotes_on {
                push_promotions(from, to, None, 0, out);
            } else if !captures_only {
                out.push(Move::quiet(from, to));

                if square_rank(from) == pawn_start_rank(side) {
                    if let Some(two_step) = offset_square(to, 0, side.pawn_direction()) {
                        if game_state.piece_at(two_step).is_none() {
                            out.push(Move::new(from, two_step, None, None, FLAG_DOUBLE_PAWN_PUSH));
                        }
                    }
                }
            }
        }
    }

    for to in squares_in(pawn_capture_targets(side, from)) {
        match game_state.piece_at(to) {
            Some(target) if target.color != side => {
                if square_rank(to) == promotes_on {
                    push_promotions(from, to, Some(target.kind), FLAG_CAPTURE, out);
                } else {
                    out.push(Move::new(from, to, Some(target.kind), None, FLAG_CAPTURE));
                }
            }
            Some(_) => {}
            None => {
                if is_en_passant_target(game_state, from, to) {
                    out.push(Move::new(
                        from,
                        to,
                        Some(PieceKind::Pawn),
                        None,
                        FLAG_CAPTURE | FLAG_EN_PASSANT,
                    ));
                }
            }
        }
    }
}

fn is_en_passant_target(game_state: &GameState, from: Square, to: Square) -> bool {
    let side = game_state.side_to_move;
    if game_state.en_passant_file != Some(square_file(to)) {
        return false;
    }
    if square_rank(from) != en_passant_capture_rank(side) {
        return false;
    }
    // The pawn that just double-stepped sits beside us on the destination file.
    let victim_square = make_square(square_file(to), square_rank(from));
    game_state.piece_at(victim_square) == Some(Piece::new(side.opposite(), PieceKind::Pawn))
}

fn push_promotions(
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u8,
    out: &mut Vec<Move>,
) {
    for promo in PROMOTION_KINDS {
        out.push(Move::new(from, to, captured, Some(promo), flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    fn pawn_moves(fen: &str, from: &str, captures_only: bool) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        let from = algebraic_to_square(from).expect("square should parse");
        generate_pawn_moves(&game, from, captures_only, &mut out);
        let mut lans: Vec<String> = out.iter().map(move_to_long_algebraic).collect();
        lans.sort();
        lans
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_advance() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2", false);
        assert_eq!(moves, vec!["e2e3", "e2e4"]);
    }

    #[test]
    fn blocked_pawn_cannot_double_step() {
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", "e2", false);
        assert_eq!(moves, vec!["e2e3"]);
        let blocked = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", "e2", false);
        assert!(blocked.is_empty());
    }

    #[test]
    fn promotions_come_in_four_pieces() {
        let moves = pawn_moves("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7", false);
        assert_eq!(
            moves,
            vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r", "a7b8b", "a7b8n", "a7b8q", "a7b8r"]
        );
    }

    #[test]
    fn en_passant_requires_matching_file_and_rank() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        assert_eq!(pawn_moves(fen, "e5", false), vec!["e5d6", "e5e6"]);
        assert_eq!(pawn_moves(fen, "e5", true), vec!["e5d6"]);

        let wrong_file = "4k3/8/8/3pP3/8/8/8/4K3 w - c6 0 1";
        assert_eq!(pawn_moves(wrong_file, "e5", false), vec!["e5e6"]);
    }

    #[test]
    fn dark_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/3p4/4N3/8/8/8/8/4K3 b - - 0 1", "d7", false);
        assert_eq!(moves, vec!["d7d5", "d7d6", "d7e6"]);
    }
}
