//! Attack tables for move generation.
//!
//! Leaper attacks and square-geometry masks are plain lookups; sliding
//! attacks go through magic bitboards (see [`magic`]). Everything is built
//! lazily on first use; call [`init`] to pay that cost up front.

mod magic;
mod tables;

use crate::board::types::{Bitboard, Color, Piece, Square};

use magic::{BISHOP_TABLE, ROOK_TABLE};
use tables::{DISTANCE, KING_ATTACKS, KNIGHT_ATTACKS, PAIR_TABLES, PAWN_ATTACKS, PAWN_MASKS};

#[cfg(test)]
pub(crate) use magic::{bishop_attacks_slow, rook_attacks_slow};

/// Force construction of every table. Idempotent.
pub fn init() {
    once_cell::sync::Lazy::force(&KNIGHT_ATTACKS);
    once_cell::sync::Lazy::force(&KING_ATTACKS);
    once_cell::sync::Lazy::force(&PAWN_ATTACKS);
    once_cell::sync::Lazy::force(&BISHOP_TABLE);
    once_cell::sync::Lazy::force(&ROOK_TABLE);
    once_cell::sync::Lazy::force(&PAIR_TABLES);
    once_cell::sync::Lazy::force(&DISTANCE);
    once_cell::sync::Lazy::force(&PAWN_MASKS);
}

#[inline]
#[must_use]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

#[inline]
#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

#[inline]
#[must_use]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    BISHOP_TABLE.attack(sq.index(), occupancy)
}

#[inline]
#[must_use]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    ROOK_TABLE.attack(sq.index(), occupancy)
}

#[inline]
#[must_use]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

/// Attack set of any piece. Pawn attacks depend on `color`, the rest ignore it.
#[inline]
#[must_use]
pub fn piece_attacks(piece: Piece, color: Color, sq: Square, occupancy: Bitboard) -> Bitboard {
    match piece {
        Piece::Pawn => pawn_attacks(color, sq),
        Piece::Knight => knight_attacks(sq),
        Piece::Bishop => bishop_attacks(sq, occupancy),
        Piece::Rook => rook_attacks(sq, occupancy),
        Piece::Queen => queen_attacks(sq, occupancy),
        Piece::King => king_attacks(sq),
    }
}

/// Squares strictly between `a` and `b`; empty unless they share a rank, file or diagonal.
#[inline]
#[must_use]
pub fn between(a: Square, b: Square) -> Bitboard {
    PAIR_TABLES.between[a.index() * 64 + b.index()]
}

/// The whole line through `a` and `b` (both included); empty unless aligned.
#[inline]
#[must_use]
pub fn line(a: Square, b: Square) -> Bitboard {
    PAIR_TABLES.line[a.index() * 64 + b.index()]
}

/// Squares a king on `king` cannot retreat to when a slider on `attacker` gives check.
#[inline]
#[must_use]
pub fn evasion_mask(king: Square, attacker: Square) -> Bitboard {
    PAIR_TABLES.evasion[king.index() * 64 + attacker.index()]
}

#[inline]
#[must_use]
pub fn distance(a: Square, b: Square) -> u8 {
    DISTANCE[a.index()][b.index()]
}

/// Squares in front of a pawn on its own file.
#[inline]
#[must_use]
pub fn pawn_front_span(color: Color, sq: Square) -> Bitboard {
    PAWN_MASKS.front_span[color.index()][sq.index()]
}

/// Enemy pawns on this mask stop a pawn on `sq` from being passed.
#[inline]
#[must_use]
pub fn passed_pawn_mask(color: Color, sq: Square) -> Bitboard {
    PAWN_MASKS.passed[color.index()][sq.index()]
}
