//! Move types and move lists.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 15;
const PROMO_SHIFT: u32 = 18;
const SQ_MASK: u32 = 0x3F;
const KIND_MASK: u32 = 0x7;

const FLAG_CASTLE: u32 = 1 << 21;
const FLAG_EN_PASSANT: u32 = 1 << 22;
const FLAG_DOUBLE_PUSH: u32 = 1 << 23;

/// Packed 24-bit move.
///
/// Encoding:
/// - bits 0-5:   from square
/// - bits 6-11:  to square
/// - bits 12-14: moving piece kind
/// - bits 15-17: captured piece kind + 1 (0 = no capture)
/// - bits 18-20: promotion piece kind (0 = none; a pawn is never a promotion target)
/// - bit 21:     castle (king move of two files)
/// - bit 22:     en passant
/// - bit 23:     double pawn push
///
/// The all-zero value is the null move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// Create a null/empty move
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    /// Plain move of `piece` from `from` to `to` with no capture
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Move(
            (from.as_u8() as u32) << FROM_SHIFT
                | (to.as_u8() as u32) << TO_SHIFT
                | (piece as u32) << PIECE_SHIFT,
        )
    }

    #[inline]
    #[must_use]
    pub const fn with_capture(self, captured: Piece) -> Self {
        Move(self.0 | (captured as u32 + 1) << CAPTURED_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(self, promo: Piece) -> Self {
        Move(self.0 | (promo as u32) << PROMO_SHIFT)
    }

    #[inline]
    #[must_use]
    pub const fn castle(from: Square, to: Square) -> Self {
        Move(Self::new(from, to, Piece::King).0 | FLAG_CASTLE)
    }

    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move(Self::new(from, to, Piece::Pawn).with_capture(Piece::Pawn).0 | FLAG_EN_PASSANT)
    }

    #[inline]
    #[must_use]
    pub const fn double_push(from: Square, to: Square) -> Self {
        Move(Self::new(from, to, Piece::Pawn).0 | FLAG_DOUBLE_PUSH)
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & SQ_MASK) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQ_MASK) as usize)
    }

    /// Kind of the moving piece
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> PIECE_SHIFT) & KIND_MASK) as usize) {
            Some(p) => p,
            None => Piece::Pawn,
        }
    }

    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        let raw = (self.0 >> CAPTURED_SHIFT) & KIND_MASK;
        if raw == 0 {
            None
        } else {
            Piece::from_index(raw as usize - 1)
        }
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        let raw = (self.0 >> PROMO_SHIFT) & KIND_MASK;
        if raw == 0 {
            None
        } else {
            Piece::from_index(raw as usize)
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & KIND_MASK != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMO_SHIFT) & KIND_MASK != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.0 & FLAG_CASTLE != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PUSH != 0
    }

    /// Neither a capture nor a promotion
    #[inline]
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Rebuild a move from its packed value. Only the low 24 bits are meaningful.
    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value & 0x00FF_FFFF)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({}{} {:?}", self.from(), self.to(), self.piece())?;
        if let Some(victim) = self.captured() {
            write!(f, " x{victim:?}")?;
        }
        if let Some(promo) = self.promotion() {
            write!(f, " ={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`, `0000` for the null move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
/// Deepest ply the search may reach; the position stack is sized from it.
pub const MAX_PLY: usize = 128;
pub(crate) const EMPTY_MOVE: Move = Move::null();

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    /// Keep only the moves for which `keep` returns true, preserving order
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            let mv = self.moves[read];
            if keep(mv) {
                self.moves[write] = mv;
                write += 1;
            }
        }
        self.len = write;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of (move, ordering score) pairs, reused per ply.
#[derive(Clone, Debug)]
pub struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    #[must_use]
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: EMPTY_MOVE,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [ScoredMove] {
        &mut self.moves[..self.len]
    }

    /// Stable sort by score, highest first.
    pub fn sort_by_score_desc(&mut self) {
        self.as_mut_slice().sort_by(|a, b| b.score.cmp(&a.score));
    }

    #[inline]
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<ScoredMove> {
        self.as_slice().get(idx).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMove> {
        self.as_slice().iter()
    }
}

impl Default for ScoredMoveList {
    fn default() -> Self {
        ScoredMoveList::new()
    }
}
