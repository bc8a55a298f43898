//! Chess board representation and game logic.
//!
//! Uses bitboards for move generation and a copy-make position stack for
//! search. Supports full chess rules including castling, en passant, and
//! promotions.
//!
//! # Example
//! ```
//! use chess_search::board::Position;
//!
//! let pos = Position::new();
//! let moves = pos.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

pub mod attack_tables;
mod error;
mod eval;
mod fen;
mod legality;
mod make;
mod movegen;
mod notation;
mod perft;
mod position;
mod pst;
pub mod search;
mod see;
mod stack;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{EngineError, FenError, MoveParseError, SquareError};
pub use eval::{Evaluator, MaterialEvaluator};
pub use fen::START_FEN;
pub use movegen::Promotions;
pub use position::{DerivedState, Position};
pub use stack::{PositionStack, MAX_GAME_HISTORY};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, ColoredPiece, Move, MoveList, Piece, ScoredMove,
    ScoredMoveList, Square, MAX_PLY, PIECE_VALUES,
};

// Public API - search functions and configuration
pub use search::{
    search, SearchConfig, SearchInfoCallback, SearchIterationInfo, SearchLimits, SearchParams,
    SearchResult, SearchState,
};

pub(crate) use types::EMPTY_MOVE;
