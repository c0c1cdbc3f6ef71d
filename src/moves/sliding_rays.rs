//! Ray directions for the sliding pieces.
//!
//! Rays are walked on the mailbox board and stop at the board edge; callers
//! decide what to do with the first occupied square.

use crate::game_state::chess_types::{offset_square, PieceKind, Square};

pub type Direction = (i8, i8);

pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ALL_DIRECTIONS: [Direction; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Directions a sliding piece moves along; empty for non-sliders.
#[inline]
pub fn slider_directions(kind: PieceKind) -> &'static [Direction] {
    match kind {
        PieceKind::Bishop => &DIAGONAL_DIRECTIONS,
        PieceKind::Rook => &ORTHOGONAL_DIRECTIONS,
        PieceKind::Queen => &ALL_DIRECTIONS,
        _ => &[],
    }
}

#[inline]
pub const fn is_diagonal(direction: Direction) -> bool {
    direction.0 != 0 && direction.1 != 0
}

/// Squares from `from` (exclusive) to the board edge along `direction`.
#[inline]
pub fn ray(from: Square, direction: Direction) -> impl Iterator<Item = Square> {
    let mut current = from;
    std::iter::from_fn(move || {
        current = offset_square(current, direction.0, direction.1)?;
        Some(current)
    })
}
