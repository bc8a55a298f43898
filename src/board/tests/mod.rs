//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Performance tests for move generation
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Stack push/pop and incremental state correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `movegen.rs` - Generator cross-checks (evasions, captures, checks)
//! - `search.rs` - Search results on reference positions
//! - `proptest.rs` - Property-based tests

mod draw;
mod movegen;
mod perft;
mod proptest;
