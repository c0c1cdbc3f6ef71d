//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys come from a fixed-seed `StdRng` so hashes are deterministic across
//! runs, which is useful for testing and debugging.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x00D1_0D10_D10C_0FFE;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Return the Zobrist key for a `(piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square as usize]
}

/// Return the Zobrist key contribution for castling rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & CASTLE_ALL) as usize]
}

/// Return the Zobrist key contribution for a valid en-passant file.
#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[(file & 7) as usize]
}

/// Return the side-to-move toggle key (xor in when dark to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position Zobrist key from the complete game state.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for (square, piece) in game_state.squares.iter().enumerate() {
        if let Some(piece) = piece {
            key ^= piece_square_key(*piece, square as Square);
        }
    }

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);

    if let Some(file) = game_state.en_passant_file {
        key ^= en_passant_file_key(file);
    }

    key
}

/// Recompute and store the hash field on the provided state.
#[inline]
pub fn refresh_game_state_hash(game_state: &mut GameState) {
    game_state.zobrist_key = compute_zobrist_key(game_state);
}
