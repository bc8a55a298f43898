//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Rights that survive a move touching each square. A move keeps
/// `rights & KEEP_MASK[from] & KEEP_MASK[to]`.
const KEEP_MASK: [u8; 64] = {
    let mut mask = [ALL_CASTLING_RIGHTS; 64];
    mask[0] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_Q;
    mask[4] = ALL_CASTLING_RIGHTS & !(CASTLE_WHITE_K | CASTLE_WHITE_Q);
    mask[7] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_K;
    mask[56] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_Q;
    mask[60] = ALL_CASTLING_RIGHTS & !(CASTLE_BLACK_K | CASTLE_BLACK_Q);
    mask[63] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_K;
    mask
};

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// True if the side still holds either right
    #[inline]
    #[must_use]
    pub const fn any_for(self, color: Color) -> bool {
        self.has(color, true) || self.has(color, false)
    }

    /// Drop the rights lost by a move between `from` and `to`
    #[inline]
    #[must_use]
    pub const fn after_move(self, from: usize, to: usize) -> Self {
        CastlingRights(self.0 & KEEP_MASK[from] & KEEP_MASK[to])
    }

    /// Raw bitmask value (indexes the Zobrist castling keys)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}
