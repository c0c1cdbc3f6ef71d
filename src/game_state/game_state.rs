//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It stores an 8x8 mailbox
//! of pieces, cached king squares, turn/state flags, clocks, the incremental
//! fingerprint, and the history stacks used by make/unmake workflows.

use crate::errors::EngineResult;
use crate::game_state::chess_types::*;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone)]
pub struct GameState {
    // --- Mailbox board, indexed by `Square` ---
    pub squares: [Option<Piece>; 64],
    // [color]
    pub king_squares: [Square; 2],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_file: Option<u8>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Incremental hashing ---
    pub zobrist_key: u64,

    // --- Repetition support: fingerprints of every earlier position ---
    pub repetition_history: Vec<u64>,

    // --- Make/unmake stack ---
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            king_squares: [0; 2],

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_file: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,

            repetition_history: Vec::new(),
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board with no kings; only useful as a builder starting point.
    #[inline]
    pub(crate) fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            game_state.put_piece(make_square(file, 0), Piece::new(Color::Light, *kind));
            game_state.put_piece(make_square(file, 1), Piece::new(Color::Light, PieceKind::Pawn));
            game_state.put_piece(make_square(file, 6), Piece::new(Color::Dark, PieceKind::Pawn));
            game_state.put_piece(make_square(file, 7), Piece::new(Color::Dark, *kind));
        }
        game_state.castling_rights = CASTLE_ALL;
        game_state.zobrist_key = compute_zobrist_key(&game_state);
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Place a piece without touching the fingerprint. Callers that build a
    /// position piece by piece recompute the key once at the end.
    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        self.squares[square as usize] = Some(piece);
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = square;
        }
    }

    /// Number of plies made since the position was set up.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// True when the current fingerprint occurred earlier since the last
    /// irreversible move.
    pub fn is_repetition(&self) -> bool {
        let window = usize::from(self.halfmove_clock);
        self.repetition_history
            .iter()
            .rev()
            .take(window)
            .any(|key| *key == self.zobrist_key)
    }

    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Whether `color` still owns a knight, bishop, rook, or queen.
    pub fn has_non_pawn_material(&self, color: Color) -> bool {
        self.squares.iter().flatten().any(|piece| {
            piece.color == color && !matches!(piece.kind, PieceKind::Pawn | PieceKind::King)
        })
    }

    pub fn count_pieces(&self, color: Color, kind: PieceKind) -> u32 {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.color == color && piece.kind == kind)
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::search::zobrist::compute_zobrist_key;

    #[test]
    fn new_game_matches_starting_fen() {
        let built = GameState::new_game();
        let parsed = GameState::from_fen(STARTING_POSITION_FEN).expect("start FEN should parse");
        assert_eq!(built.squares, parsed.squares);
        assert_eq!(built.zobrist_key, parsed.zobrist_key);
        assert_eq!(built.get_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn king_squares_are_cached() {
        let game = GameState::new_game();
        assert_eq!(game.king_square(Color::Light), 4);
        assert_eq!(game.king_square(Color::Dark), 60);
        assert_eq!(game.zobrist_key, compute_zobrist_key(&game));
    }

    #[test]
    fn non_pawn_material_ignores_kings_and_pawns() {
        let game = GameState::from_fen("4k3/pppp4/8/8/8/8/4P3/4K2N w - - 0 1")
            .expect("FEN should parse");
        assert!(game.has_non_pawn_material(Color::Light));
        assert!(!game.has_non_pawn_material(Color::Dark));
        assert_eq!(game.count_pieces(Color::Dark, PieceKind::Pawn), 4);
    }
}
