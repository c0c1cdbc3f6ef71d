//! Move value type shared by generation, search, and the protocol codecs.
//!
//! Identity is origin, destination, and promotion piece. The flag bits and the
//! captured piece are derived from the position the move was generated in.

use crate::game_state::chess_types::{PieceKind, Square};

pub type MoveFlags = u8;

pub const FLAG_CAPTURE: MoveFlags = 1 << 0;
pub const FLAG_DOUBLE_PAWN_PUSH: MoveFlags = 1 << 1;
pub const FLAG_EN_PASSANT: MoveFlags = 1 << 2;
pub const FLAG_CASTLING: MoveFlags = 1 << 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
    pub captured: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        captured: Option<PieceKind>,
        promotion: Option<PieceKind>,
        flags: MoveFlags,
    ) -> Self {
        Self {
            from,
            to,
            promotion,
            flags,
            captured,
        }
    }

    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Self::new(from, to, None, None, 0)
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flags & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_double_pawn_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Captures and promotions, the moves quiescence search looks at.
    #[inline]
    pub const fn is_tactical(&self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    #[inline]
    pub const fn is_quiet(&self) -> bool {
        !self.is_tactical()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }
}

impl Eq for Move {}
