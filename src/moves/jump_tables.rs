//! Precomputed target masks for the fixed-offset movers.
//!
//! Knight, king, and pawn-capture targets never depend on occupancy, so they
//! are built once at compile time as 64-bit square masks. The mailbox code
//! walks the set bits with [`squares_in`].

use crate::game_state::chess_types::{Color, Square};

pub const KNIGHT_TARGETS: [u64; 64] = generate_jump_table(&KNIGHT_OFFSETS);
pub const KING_TARGETS: [u64; 64] = generate_jump_table(&KING_OFFSETS);
pub const LIGHT_PAWN_CAPTURES: [u64; 64] = generate_jump_table(&[(-1, 1), (1, 1)]);
pub const DARK_PAWN_CAPTURES: [u64; 64] = generate_jump_table(&[(-1, -1), (1, -1)]);

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
pub const fn knight_targets(square: Square) -> u64 {
    KNIGHT_TARGETS[square as usize]
}

#[inline]
pub const fn king_targets(square: Square) -> u64 {
    KING_TARGETS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_capture_targets(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_CAPTURES[square as usize],
        Color::Dark => DARK_PAWN_CAPTURES[square as usize],
    }
}

/// Iterate the set squares of a mask, lowest first.
#[inline]
pub fn squares_in(mut mask: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let square = mask.trailing_zeros() as Square;
        mask &= mask - 1;
        Some(square)
    })
}

const fn generate_jump_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut targets = 0u64;
        let mut i = 0usize;
        while i < offsets.len() {
            targets |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = targets;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}
