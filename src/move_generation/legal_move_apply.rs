//! In-place make/unmake with incremental fingerprint maintenance.
//!
//! Every field needed to reverse a move is pushed onto the undo stack before
//! the board is touched, so `unmake_move_in_place` restores a bit-identical
//! state, fingerprint included.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{
    castling_rook_squares, king_castling_rights, CASTLING_ROOK_HOMES,
};
use crate::game_state::undo_state::NullMoveUndo;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;
use crate::search::zobrist::{
    castling_key, en_passant_file_key, piece_square_key, side_to_move_key,
};

pub fn make_move_in_place(game_state: &mut GameState, mv: Move) -> EngineResult<()> {
    let moved_piece = game_state
        .piece_at(mv.from)
        .ok_or(EngineError::NoPieceOnSquare { square: mv.from })?;
    let side = moved_piece.color;
    let captured_square = captured_square(mv);
    let captured_piece = game_state.piece_at(captured_square).filter(|p| p.color != side);

    game_state.undo_stack.push(UndoState {
        mv,
        moved_piece,
        captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_file: game_state.en_passant_file,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
    });
    game_state.repetition_history.push(game_state.zobrist_key);

    let mut key = game_state.zobrist_key;
    if let Some(file) = game_state.en_passant_file {
        key ^= en_passant_file_key(file);
    }
    key ^= castling_key(game_state.castling_rights);

    // Lift the mover, remove the victim, drop the (possibly promoted) piece.
    game_state.squares[mv.from as usize] = None;
    key ^= piece_square_key(moved_piece, mv.from);

    if let Some(captured) = captured_piece {
        game_state.squares[captured_square as usize] = None;
        key ^= piece_square_key(captured, captured_square);
    }

    let placed = mv
        .promotion
        .map(|kind| Piece::new(side, kind))
        .unwrap_or(moved_piece);
    game_state.squares[mv.to as usize] = Some(placed);
    key ^= piece_square_key(placed, mv.to);

    if moved_piece.kind == PieceKind::King {
        game_state.king_squares[side.index()] = mv.to;
        if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to) {
                let rook = Piece::new(side, PieceKind::Rook);
                game_state.squares[rook_from as usize] = None;
                game_state.squares[rook_to as usize] = Some(rook);
                key ^= piece_square_key(rook, rook_from) ^ piece_square_key(rook, rook_to);
            }
        }
    }

    game_state.castling_rights =
        updated_castling_rights(game_state.castling_rights, moved_piece, mv);
    key ^= castling_key(game_state.castling_rights);

    game_state.en_passant_file = if mv.is_double_pawn_push() {
        Some(square_file(mv.from))
    } else {
        None
    };
    if let Some(file) = game_state.en_passant_file {
        key ^= en_passant_file_key(file);
    }

    if moved_piece.kind == PieceKind::Pawn || captured_piece.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if side == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = side.opposite();
    key ^= side_to_move_key();
    game_state.zobrist_key = key;

    Ok(())
}

/// Reverse the most recent `make_move_in_place`, returning the move undone.
pub fn unmake_move_in_place(game_state: &mut GameState) -> EngineResult<Move> {
    let undo = game_state
        .undo_stack
        .pop()
        .ok_or(EngineError::EmptyUndoStack)?;
    game_state.repetition_history.pop();

    let mv = undo.mv;
    let side = undo.moved_piece.color;

    game_state.squares[mv.to as usize] = None;
    game_state.squares[mv.from as usize] = Some(undo.moved_piece);
    if let Some(captured) = undo.captured_piece {
        game_state.squares[captured_square(mv) as usize] = Some(captured);
    }

    if undo.moved_piece.kind == PieceKind::King {
        game_state.king_squares[side.index()] = mv.from;
        if mv.is_castling() {
            if let Some((rook_from, rook_to)) = castling_rook_squares(mv.to) {
                game_state.squares[rook_to as usize] = None;
                game_state.squares[rook_from as usize] = Some(Piece::new(side, PieceKind::Rook));
            }
        }
    }

    game_state.side_to_move = side;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_file = undo.prev_en_passant_file;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.zobrist_key = undo.prev_zobrist_key;

    Ok(mv)
}

/// Pass the turn without moving. Used by null-move pruning only.
pub fn make_null_move(game_state: &mut GameState) -> NullMoveUndo {
    let undo = NullMoveUndo {
        prev_en_passant_file: game_state.en_passant_file,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_zobrist_key: game_state.zobrist_key,
    };
    game_state.repetition_history.push(game_state.zobrist_key);

    let mut key = game_state.zobrist_key;
    if let Some(file) = game_state.en_passant_file.take() {
        key ^= en_passant_file_key(file);
    }
    key ^= side_to_move_key();
    game_state.side_to_move = game_state.side_to_move.opposite();
    // Repetition scans must not reach across the passed turn.
    game_state.halfmove_clock = 0;
    game_state.zobrist_key = key;

    undo
}

pub fn unmake_null_move(game_state: &mut GameState, undo: NullMoveUndo) {
    game_state.repetition_history.pop();
    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.en_passant_file = undo.prev_en_passant_file;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.zobrist_key = undo.prev_zobrist_key;
}

#[inline]
fn captured_square(mv: Move) -> Square {
    if mv.is_en_passant() {
        make_square(square_file(mv.to), square_rank(mv.from))
    } else {
        mv.to
    }
}

fn updated_castling_rights(rights: CastlingRights, moved_piece: Piece, mv: Move) -> CastlingRights {
    let mut rights = rights;
    if moved_piece.kind == PieceKind::King {
        rights &= !king_castling_rights(moved_piece.color);
    }
    // A rook leaving its home square, or anything landing on it, ends that right.
    for (home, right) in CASTLING_ROOK_HOMES {
        if mv.from == home || mv.to == home {
            rights &= !right;
        }
    }
    rights
}
