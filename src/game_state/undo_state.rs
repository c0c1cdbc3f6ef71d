use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record for `make_move_in_place` / `unmake_move_in_place`.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_file: Option<u8>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}

/// Undo record for a null move (side switch without moving a piece).
#[derive(Debug, Clone, Copy)]
pub struct NullMoveUndo {
    pub prev_en_passant_file: Option<u8>,
    pub prev_halfmove_clock: u16,
    pub prev_zobrist_key: u64,
}
