//! Square conversions for long algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by the FEN, move text, and UCI components.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_types::{make_square, square_file, square_rank, Square};

/// Convert a coordinate (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> EngineResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::InvalidSquare(square.to_owned()));
    }

    Ok(make_square(file - b'a', rank - b'1'))
}

/// Convert a square index (`0..=63`) to a coordinate (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square_file(square));
    let rank_char = char::from(b'1' + square_rank(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::errors::EngineError;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
    }

    #[test]
    fn rejects_off_board_text() {
        for bad in ["", "i1", "a9", "a0", "e44", "E4"] {
            assert_eq!(
                algebraic_to_square(bad),
                Err(EngineError::InvalidSquare(bad.to_owned()))
            );
        }
    }
}
