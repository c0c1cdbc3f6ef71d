use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::jump_tables::{knight_targets, squares_in};
use crate::moves::move_descriptions::{Move, FLAG_CAPTURE};

pub fn generate_knight_moves(
    game_state: &GameState,
    from: Square,
    captures_only: bool,
    out: &mut Vec<Move>,
) {
    push_jump_moves(game_state, from, knight_targets(from), captures_only, out);
}

/// Fixed-offset moves onto empty or enemy-occupied target squares.
pub(crate) fn push_jump_moves(
    game_state: &GameState,
    from: Square,
    targets: u64,
    captures_only: bool,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    for to in squares_in(targets) {
        match game_state.piece_at(to) {
            None if !captures_only => out.push(Move::quiet(from, to)),
            Some(target) if target.color != side => {
                out.push(Move::new(from, to, Some(target.kind), None, FLAG_CAPTURE));
            }
            _ => {}
        }
    }
}
