//! Zobrist hashing for chess positions.
//!
//! Keys are drawn from a fixed-seed RNG so hashes are stable across runs.
//! A position's hash is the XOR of one key per occupied (piece, square), the
//! side key when Black is to move, the key of the castling-rights bitmask and
//! the en-passant file key when an en-passant target is set. The pawn hash
//! XORs only the pawn keys.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, ColoredPiece, Square};

pub(crate) struct ZobristKeys {
    /// `piece_keys[colored_piece.index()][square]`
    piece_keys: [[u64; 64]; 12],
    black_to_move: u64,
    /// One key per castling-rights bitmask, so a rights change is a single XOR pair.
    castling_keys: [u64; 16],
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[0; 64]; 12];
        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen();
            }
        }
        let black_to_move = rng.gen();
        let mut castling_keys = [0; 16];
        for key in castling_keys.iter_mut().skip(1) {
            *key = rng.gen();
        }
        let mut en_passant_keys = [0; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }
        ZobristKeys {
            piece_keys,
            black_to_move,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(piece: ColoredPiece, sq: Square) -> u64 {
    ZOBRIST.piece_keys[piece.index()][sq.index()]
}

#[inline]
pub(crate) fn side_key() -> u64 {
    ZOBRIST.black_to_move
}

/// Key of a whole rights bitmask. No rights hashes to zero.
#[inline]
pub(crate) fn castling_key(rights: CastlingRights) -> u64 {
    ZOBRIST.castling_keys[rights.as_u8() as usize]
}

#[inline]
pub(crate) fn en_passant_key(sq: Square) -> u64 {
    ZOBRIST.en_passant_keys[sq.file()]
}
