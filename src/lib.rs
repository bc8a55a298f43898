//! Chess search core: bitboard position, legal move generation, an
//! alpha-beta searcher with a transposition table, and time management.
//!
//! # Example
//! ```
//! use chess_search::engine::{Engine, EngineConfig};
//! use chess_search::board::SearchLimits;
//!
//! let mut engine = Engine::new(EngineConfig { hash_mb: 1, ..EngineConfig::default() });
//! engine.set_position(None, &["e2e4", "e7e5"]).unwrap();
//! let result = engine.go(&SearchLimits::depth(3), None);
//! println!("best move: {}", result.best_move.unwrap());
//! ```

pub mod board;
pub mod book;
pub mod engine;
pub mod sync;
pub mod timer;
pub mod tt;
pub mod zobrist;

pub use board::{Color, Move, Piece, Position, PositionStack, Square};
pub use engine::{Engine, EngineConfig};
pub use sync::StopFlag;
pub use tt::TranspositionTable;
