//! FEN-to-GameState parser.
//!
//! Builds a fully-populated incremental state from a Forsyth-Edwards Notation
//! string: placement, cached king squares, rights, clocks, and fingerprint.
//! The two clock fields are optional and default to `0 1`.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::CASTLING_ROOK_HOMES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::algebraic::algebraic_to_square;

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidFen(message.into())
}

pub fn parse_fen(fen: &str) -> EngineResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)? & castling_rights_on_board(&game_state);
    game_state.en_passant_file = parse_en_passant_file(en_passant_part, game_state.side_to_move)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("bad halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("bad fullmove number '{fullmove_part}'")))?
        .max(1);

    // The side that just moved cannot have left its king attacked.
    if is_king_in_check(&game_state, game_state.side_to_move.opposite()) {
        return Err(invalid("side not to move is in check"));
    }

    game_state.zobrist_key = compute_zobrist_key(&game_state);
    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> EngineResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut king_counts = [0u8; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("bad empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("rank has too many files"));
                }
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("bad piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid("rank has too many files"));
            }

            if piece.kind == PieceKind::King {
                king_counts[piece.color.index()] += 1;
            }
            game_state.put_piece(make_square(file, board_rank), piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    if king_counts != [1, 1] {
        return Err(invalid("each side needs exactly one king"));
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> EngineResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(format!("bad side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> EngineResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(format!("bad castling character '{ch}'"))),
        }
    }

    Ok(rights)
}

/// Rights whose king and rook both still stand on their home squares.
fn castling_rights_on_board(game_state: &GameState) -> CastlingRights {
    CASTLING_ROOK_HOMES
        .iter()
        .filter(|(rook_home, _)| {
            let color = if *rook_home < 8 { Color::Light } else { Color::Dark };
            let king_home = if color == Color::Light { 4 } else { 60 };
            game_state.piece_at(*rook_home) == Some(Piece::new(color, PieceKind::Rook))
                && game_state.piece_at(king_home) == Some(Piece::new(color, PieceKind::King))
        })
        .fold(0, |rights, (_, right)| rights | right)
}

fn parse_en_passant_file(en_passant_part: &str, side_to_move: Color) -> EngineResult<Option<u8>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(format!("bad en-passant square '{en_passant_part}'")))?;
    let expected_rank = match side_to_move {
        Color::Light => 5,
        Color::Dark => 2,
    };
    if square_rank(square) != expected_rank {
        return Err(invalid(format!("en-passant square '{en_passant_part}' on wrong rank")));
    }

    Ok(Some(square_file(square)))
}

pub(crate) fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
