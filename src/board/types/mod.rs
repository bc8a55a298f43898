//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece`, `Color` and the packed `ColoredPiece`
//! - `Square` - board square index (0-63)
//! - `Bitboard` - 64-bit square set
//! - `Move`, `MoveList`, `ScoredMoveList` - packed moves and move buffers
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, ScoredMove, ScoredMoveList, MAX_PLY};
pub use piece::{Color, ColoredPiece, Piece, PIECE_VALUES};
pub use square::Square;

pub(crate) use moves::EMPTY_MOVE;
pub(crate) use piece::PROMOTION_PIECES;
