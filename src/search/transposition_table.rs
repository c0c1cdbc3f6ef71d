//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! The slot count is a power of two so the index is a mask of the key. There
//! is one entry per slot and the last store wins. Mate scores are stored relative to the node that holds them and
//! converted back to root-relative scores on the way out.

use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::MATE_IN_MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// A beta cutoff happened; the true score is at least `score`.
    Lower,
    /// Nothing beat alpha; the true score is at most `score`.
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// Whether the stored bound settles a search with window `(alpha, beta)`.
    /// `score` must already be converted with [`score_from_tt`].
    #[inline]
    pub fn cuts_window(&self, score: i32, alpha: i32, beta: i32) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

/// Root-relative mate score to node-relative storage form.
#[inline]
pub fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_IN_MAX {
        score + ply as i32
    } else if score <= -MATE_IN_MAX {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`] for the ply the entry is read at.
#[inline]
pub fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_IN_MAX {
        score - ply as i32
    } else if score <= -MATE_IN_MAX {
        score + ply as i32
    } else {
        score
    }
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    index_mask: usize,
    stats: TTStats,
}

impl TranspositionTable {
    /// Largest power-of-two slot count fitting in `size_mb` megabytes.
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let slot_size = std::mem::size_of::<Option<TTEntry>>();
        let raw_count = (bytes / slot_size).max(1);
        // Round down so the table never exceeds the requested budget.
        let count = 1usize << (usize::BITS - 1 - raw_count.leading_zeros());
        Self::with_slots(count)
    }

    fn with_slots(count: usize) -> Self {
        Self {
            entries: vec![None; count],
            index_mask: count - 1,
            stats: TTStats::default(),
        }
    }

    /// Reset the per-search counters. Entries survive between searches.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key as usize) & self.index_mask
    }

    /// Entry stored for exactly this fingerprint, at any depth.
    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries[self.idx(key)].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Overwrite the slot. A result without a move keeps the previous move
    /// hint for the same position.
    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        let previous_move = self.entries[idx]
            .filter(|existing| existing.key == entry.key)
            .and_then(|existing| existing.best_move);
        self.entries[idx] = Some(TTEntry {
            best_move: entry.best_move.or(previous_move),
            ..entry
        });
    }
}
