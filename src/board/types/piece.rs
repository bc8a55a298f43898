//! Piece and color types.

use std::fmt;
use std::num::NonZeroU8;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// All piece types in index order
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Piece::index`]. Out-of-range values map to `None`.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Option<Piece> {
        match idx {
            0 => Some(Piece::Pawn),
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            5 => Some(Piece::King),
            _ => None,
        }
    }

    /// Parse a piece from a character of either case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// Convert piece to lowercase character
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Standard material value in centipawns.
    ///
    /// Pawn=100, Knight=320, Bishop=330, Rook=500, Queen=900. The king is
    /// never captured and counts as zero material.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        PIECE_VALUES[self as usize]
    }

    /// Returns true if this piece slides (Bishop, Rook, Queen)
    #[inline]
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

/// Material values indexed by [`Piece::index`].
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Promotion piece choices, queen first
pub(crate) const PROMOTION_PIECES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Scoring sign for evaluation (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Square delta of a single pawn push
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_push(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A piece of a given color packed into one byte.
///
/// Layout: bits 0-2 hold `kind + 1` (so the value is never zero), bit 3 holds the
/// color. The non-zero niche keeps `Option<ColoredPiece>` at one byte, which is
/// what the per-square mailbox stores.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ColoredPiece(NonZeroU8);

impl ColoredPiece {
    #[inline]
    #[must_use]
    pub const fn new(color: Color, piece: Piece) -> Self {
        let raw = (piece as u8 + 1) | ((color as u8) << 3);
        match NonZeroU8::new(raw) {
            Some(nz) => ColoredPiece(nz),
            None => unreachable!(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0.get() & 7) - 1) as usize) {
            Some(p) => p,
            None => unreachable!(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        if self.0.get() & 8 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Dense index 0..12 (color * 6 + kind), for per-piece tables
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.color().index() * 6 + self.piece().index()
    }

    /// FEN character: uppercase for White
    #[must_use]
    pub fn to_fen_char(self) -> char {
        let c = self.piece().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let piece = Piece::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(ColoredPiece::new(color, piece))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_piece_packs_both_fields() {
        for color in Color::BOTH {
            for piece in Piece::ALL {
                let cp = ColoredPiece::new(color, piece);
                assert_eq!(cp.color(), color);
                assert_eq!(cp.piece(), piece);
                assert!(cp.index() < 12);
            }
        }
        assert_eq!(std::mem::size_of::<Option<ColoredPiece>>(), 1);
    }

    #[test]
    fn fen_chars() {
        let wk = ColoredPiece::new(Color::White, Piece::King);
        assert_eq!(wk.to_fen_char(), 'K');
        assert_eq!(ColoredPiece::from_fen_char('n'), Some(ColoredPiece::new(Color::Black, Piece::Knight)));
        assert_eq!(ColoredPiece::from_fen_char('x'), None);
    }
}
