//! Full legal move generation pipeline.
//!
//! Piece-wise pseudo-legal generation feeds a make/check/unmake filter that
//! drops every move leaving the mover's own king attacked.

use crate::errors::EngineResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliding::generate_sliding_moves;
use crate::moves::move_descriptions::Move;

/// Every move obeying piece movement rules for the side to move, including
/// ones that leave its own king in check. With `captures_only` quiet moves
/// are skipped, except promotions.
pub fn generate_pseudo_legal_moves(game_state: &GameState, captures_only: bool) -> Vec<Move> {
    let side = game_state.side_to_move;
    let mut out = Vec::with_capacity(64);

    for from in 0..64u8 {
        let Some(piece) = game_state.piece_at(from) else {
            continue;
        };
        if piece.color != side {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, from, captures_only, &mut out),
            PieceKind::Knight => generate_knight_moves(game_state, from, captures_only, &mut out),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                generate_sliding_moves(game_state, from, piece.kind, captures_only, &mut out)
            }
            PieceKind::King => generate_king_moves(game_state, from, captures_only, &mut out),
        }
    }

    out
}

/// All legal moves. The position is borrowed mutably for the filter and is
/// left exactly as it was found.
pub fn generate_legal_moves(game_state: &mut GameState) -> EngineResult<Vec<Move>> {
    let pseudo = generate_pseudo_legal_moves(game_state, false);
    filter_legal(game_state, pseudo)
}

/// Legal captures and promotions, for quiescence.
pub fn generate_legal_captures(game_state: &mut GameState) -> EngineResult<Vec<Move>> {
    let pseudo = generate_pseudo_legal_moves(game_state, true);
    filter_legal(game_state, pseudo)
}

fn filter_legal(game_state: &mut GameState, pseudo: Vec<Move>) -> EngineResult<Vec<Move>> {
    let mover = game_state.side_to_move;
    let mut legal = Vec::with_capacity(pseudo.len());

    for mv in pseudo {
        make_move_in_place(game_state, mv)?;
        let leaves_king_attacked = is_king_in_check(game_state, mover);
        unmake_move_in_place(game_state)?;

        if !leaves_king_attacked {
            legal.push(mv);
        }
    }

    Ok(legal)
}
