use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{Move, FLAG_CAPTURE};
use crate::moves::sliding_rays::{ray, slider_directions};

/// Bishop, rook, and queen moves: each ray runs to the edge or the first
/// blocker, capturing the blocker when it belongs to the opponent.
pub fn generate_sliding_moves(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    captures_only: bool,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    for direction in slider_directions(kind) {
        for to in ray(from, *direction) {
            match game_state.piece_at(to) {
                None => {
                    if !captures_only {
                        out.push(Move::quiet(from, to));
                    }
                }
                Some(target) => {
                    if target.color != side {
                        out.push(Move::new(from, to, Some(target.kind), None, FLAG_CAPTURE));
                    }
                    break;
                }
            }
        }
    }
}
