//! Static table of scripted opening replies.
//!
//! Rows are tab-separated with a `moves` column (a line of long algebraic
//! moves from the start position, `-` or empty for the start position itself)
//! and a `replies` column (candidate answers, best first). Each line is
//! replayed once at load time and the replies are indexed by the fingerprint
//! of the position they answer, so transpositions share an entry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::long_algebraic::{apply_long_algebraic_move, long_algebraic_to_move};

/// Replies are only consulted while fewer plies than this have been played.
pub const OPENING_HORIZON_PLIES: usize = 12;

const START_POSITION_MARKER: &str = "-";

#[derive(Debug, Clone, Default)]
pub struct OpeningTable {
    by_hash: HashMap<u64, Vec<Move>>,
}

impl OpeningTable {
    /// The table compiled into the binary.
    pub fn load_default() -> EngineResult<Self> {
        Self::from_tsv_str(include_str!("data/opening_replies.tsv"))
    }

    pub fn from_tsv_path(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| EngineError::OpeningTable(format!("failed reading {}: {e}", path.display())))?;
        Self::from_tsv_str(&data)
    }

    pub fn from_tsv_str(tsv: &str) -> EngineResult<Self> {
        let mut lines = tsv.lines().filter(|line| !line.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| EngineError::OpeningTable("opening TSV is empty".to_owned()))?;

        let mut moves_idx = None;
        let mut replies_idx = None;
        for (i, name) in header.split('\t').enumerate() {
            match name.trim().to_ascii_lowercase().as_str() {
                "moves" => moves_idx = Some(i),
                "replies" => replies_idx = Some(i),
                _ => {}
            }
        }
        let (Some(moves_idx), Some(replies_idx)) = (moves_idx, replies_idx) else {
            return Err(EngineError::OpeningTable(
                "opening TSV needs 'moves' and 'replies' columns".to_owned(),
            ));
        };

        let mut by_hash: HashMap<u64, Vec<Move>> = HashMap::new();
        for line in lines {
            let fields: Vec<&str> = line.split('\t').collect();
            let sequence = fields.get(moves_idx).map_or("", |s| s.trim());
            let replies = fields
                .get(replies_idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| EngineError::OpeningTable(format!("row without replies: '{line}'")))?;

            let mut state = GameState::new_game();
            if sequence != START_POSITION_MARKER {
                for token in sequence.split_whitespace() {
                    apply_long_algebraic_move(token, &mut state).map_err(|e| {
                        EngineError::OpeningTable(format!("bad move '{token}' in row '{line}': {e}"))
                    })?;
                }
            }

            let row = by_hash.entry(state.zobrist_key).or_default();
            for token in replies.split_whitespace() {
                let reply = long_algebraic_to_move(token, &mut state).map_err(|e| {
                    EngineError::OpeningTable(format!("bad reply '{token}' in row '{line}': {e}"))
                })?;
                if !row.contains(&reply) {
                    row.push(reply);
                }
            }
        }

        Ok(Self { by_hash })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Candidate replies for this exact position, in listed order.
    pub fn replies_for(&self, game_state: &GameState) -> Option<&[Move]> {
        self.by_hash.get(&game_state.zobrist_key).map(Vec::as_slice)
    }

    /// First listed reply that is legal here, if the game is still young
    /// enough for the table to apply.
    pub fn choose_reply(&self, game_state: &mut GameState) -> EngineResult<Option<Move>> {
        if game_state.history_len() >= OPENING_HORIZON_PLIES {
            return Ok(None);
        }
        let Some(replies) = self.replies_for(game_state) else {
            return Ok(None);
        };
        let legal = generate_legal_moves(game_state)?;
        Ok(replies
            .iter()
            .find_map(|reply| legal.iter().copied().find(|mv| mv == reply)))
    }
}
