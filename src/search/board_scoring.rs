//! Pluggable board evaluation interfaces and implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Every scorer is a pure function of the position.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::sliding_rays::{ray, ORTHOGONAL_DIRECTIONS};

/// Larger than any reachable score.
pub const INF_SCORE: i32 = 30000;
/// Score of delivering mate at the root; mates further away score less.
pub const MATE_SCORE: i32 = 29000;
/// Scores at or beyond this magnitude encode a forced mate.
pub const MATE_IN_MAX: i32 = 28000;

pub const BISHOP_PAIR_BONUS: i32 = 25;
pub const ROOK_FILE_MOBILITY_WEIGHT: i32 = 2;
/// Fewer knights, bishops, rooks, and queens than this on the whole board
/// switches kings to the endgame table.
pub const ENDGAME_PIECE_THRESHOLD: u32 = 4;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_IN_MAX
}

#[inline]
fn from_side_to_move(game_state: &GameState, light_minus_dark: i32) -> i32 {
    match game_state.side_to_move {
        Color::Light => light_minus_dark,
        Color::Dark => -light_minus_dark,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let light_minus_dark = game_state
            .squares
            .iter()
            .flatten()
            .filter(|piece| piece.kind != PieceKind::King)
            .map(|piece| match piece.color {
                Color::Light => piece.kind.value(),
                Color::Dark => -piece.kind.value(),
            })
            .sum();
        from_side_to_move(game_state, light_minus_dark)
    }
}

// Tables are indexed a1 = 0 .. h8 = 63 from the light side; dark pieces read
// them through `mirror_square`.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  5,  5, -5, -5,  5,  5,  0,
     0, 10, -5,  0,  0, -5, 10,  0,
     0, 10, 10, 20, 20, 10, 10,  0,
     5, 15, 20, 25, 25, 20, 15,  5,
    10, 20, 25, 30, 30, 25, 20, 10,
    15, 25, 30, 35, 35, 30, 25, 15,
    30, 40, 45, 50, 50, 45, 40, 30,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
   -30,-10,-10,-10,-10,-10,-10,-30,
   -10,  0,  5,  0,  0,  5,  0,-10,
   -10,  5, 10, 10, 10, 10,  5,-10,
   -10,  0, 10, 15, 15, 10,  0,-10,
   -10,  0, 10, 15, 15, 10,  0,-10,
   -10,  5, 10, 10, 10, 10,  5,-10,
   -10,  0,  5,  0,  0,  5,  0,-10,
   -30,-10,-10,-10,-10,-10,-10,-30,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10, 10,  0,  5,  5,  0, 10,-10,
   -10,  5, 10, 10, 10, 10,  5,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10,  5, 10, 10, 10, 10,  5,-10,
   -10, 10,  0,  5,  5,  0, 10,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  5, 10, 10,  5,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  5,  5,  0,  0, -5,
    -5,  0,  0,  5,  5,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  5,  0,  0,  0,  0,-10,
   -10,  5,  5,  5,  5,  5,  0,-10,
    -5,  0,  5,  5,  5,  5,  0, -5,
    -5,  0,  5,  5,  5,  5,  0, -5,
   -10,  0,  5,  5,  5,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

// Shelter on the home rank, penalties further up the board.
#[rustfmt::skip]
const KING_MIDDLEGAME_TABLE: [i32; 64] = [
    20, 30, 10,  0,  0, 10, 30, 20,
    20, 20,  0,  0,  0,  0, 20, 20,
   -10,-20,-20,-20,-20,-20,-20,-10,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
   -50,-30,-30,-30,-30,-30,-30,-50,
   -30,-30,-10,  0,  0,-10,-30,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -50,-30,-30,-30,-30,-30,-30,-50,
];

/// Material, piece-square tables, bishop pair, and open-line mobility for
/// rooks and queens.
///
/// Kings use the average of the middlegame and endgame tables until the
/// board thins out below [`ENDGAME_PIECE_THRESHOLD`] pieces, then the endgame
/// table alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    #[inline]
    fn square_bonus(kind: PieceKind, index: usize, endgame: bool) -> i32 {
        match kind {
            PieceKind::Pawn => PAWN_TABLE[index],
            PieceKind::Knight => KNIGHT_TABLE[index],
            PieceKind::Bishop => BISHOP_TABLE[index],
            PieceKind::Rook => ROOK_TABLE[index],
            PieceKind::Queen => QUEEN_TABLE[index],
            PieceKind::King if endgame => KING_ENDGAME_TABLE[index],
            PieceKind::King => (KING_MIDDLEGAME_TABLE[index] + KING_ENDGAME_TABLE[index]) / 2,
        }
    }

    /// Empty squares reachable along ranks and files.
    fn orthogonal_mobility(game_state: &GameState, square: Square) -> i32 {
        ORTHOGONAL_DIRECTIONS
            .iter()
            .map(|direction| {
                ray(square, *direction)
                    .take_while(|sq| game_state.piece_at(*sq).is_none())
                    .count() as i32
            })
            .sum()
    }

    fn is_endgame(game_state: &GameState) -> bool {
        let pieces = game_state
            .squares
            .iter()
            .flatten()
            .filter(|piece| !matches!(piece.kind, PieceKind::Pawn | PieceKind::King))
            .count() as u32;
        pieces < ENDGAME_PIECE_THRESHOLD
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let endgame = Self::is_endgame(game_state);
        let mut light_minus_dark = 0i32;
        let mut bishops = [0u8; 2];

        for (square, piece) in game_state
            .squares
            .iter()
            .enumerate()
            .filter_map(|(sq, piece)| piece.map(|piece| (sq as Square, piece)))
        {
            let table_index = match piece.color {
                Color::Light => square,
                Color::Dark => mirror_square(square),
            } as usize;

            let mut term = Self::square_bonus(piece.kind, table_index, endgame);
            if piece.kind != PieceKind::King {
                term += piece.kind.value();
            }
            match piece.kind {
                PieceKind::Bishop => bishops[piece.color.index()] += 1,
                PieceKind::Rook | PieceKind::Queen => {
                    term += ROOK_FILE_MOBILITY_WEIGHT * Self::orthogonal_mobility(game_state, square);
                }
                _ => {}
            }

            match piece.color {
                Color::Light => light_minus_dark += term,
                Color::Dark => light_minus_dark -= term,
            }
        }

        if bishops[Color::Light.index()] >= 2 {
            light_minus_dark += BISHOP_PAIR_BONUS;
        }
        if bishops[Color::Dark.index()] >= 2 {
            light_minus_dark -= BISHOP_PAIR_BONUS;
        }

        from_side_to_move(game_state, light_minus_dark)
    }
}
