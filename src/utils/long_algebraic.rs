//! Long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Castling is written as the king's two-square move. Text is resolved
//! against the legal move list, so flags and captured pieces always come from
//! the generator.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move_in_place;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from));
    out.push_str(&square_to_algebraic(mv.to));
    if let Some(kind) = mv.promotion {
        out.push(promotion_to_char(kind));
    }
    out
}

/// Split move text into origin, destination, and promotion piece.
pub fn parse_long_algebraic(text: &str) -> EngineResult<(Square, Square, Option<PieceKind>)> {
    let malformed = || EngineError::MalformedMove(text.to_owned());

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(malformed());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| malformed())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| malformed())?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(char_to_promotion(ch).ok_or_else(malformed)?),
    };

    Ok((from, to, promotion))
}

/// Resolve move text to the matching legal move in `game_state`.
pub fn long_algebraic_to_move(text: &str, game_state: &mut GameState) -> EngineResult<Move> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    let wanted = Move {
        from,
        to,
        promotion,
        ..Move::default()
    };

    generate_legal_moves(game_state)?
        .into_iter()
        .find(|mv| *mv == wanted)
        .ok_or_else(|| EngineError::IllegalMove(text.to_owned()))
}

/// Validate and play move text received from outside the engine.
pub fn apply_long_algebraic_move(text: &str, game_state: &mut GameState) -> EngineResult<Move> {
    let mv = long_algebraic_to_move(text, game_state)?;
    make_move_in_place(game_state, mv)?;
    Ok(mv)
}

fn promotion_to_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
