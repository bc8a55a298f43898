//! Opening book lookup.
//!
//! A book maps positions to candidate moves. The engine consults it once at
//! the root before searching and plays a random legal candidate.

use std::collections::HashMap;

use crate::board::{Move, MoveParseError, Position};

/// Source of prepared moves for a position.
pub trait OpeningBook: Send {
    /// Candidate moves for `pos`; empty when the position is not in the book.
    /// Candidates need not be legal; the caller filters them.
    fn lookup(&self, pos: &Position) -> Vec<Move>;
}

/// A book that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBook;

impl OpeningBook for NoBook {
    fn lookup(&self, _pos: &Position) -> Vec<Move> {
        Vec::new()
    }
}

/// In-memory book keyed by position hash.
#[derive(Debug, Clone, Default)]
pub struct HashBook {
    entries: HashMap<u64, Vec<Move>>,
}

impl HashBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `mv` as a candidate for `pos`.
    pub fn insert(&mut self, pos: &Position, mv: Move) {
        let moves = self.entries.entry(pos.hash()).or_default();
        if !moves.contains(&mv) {
            moves.push(mv);
        }
    }

    /// Add a line of coordinate moves played from `start`, one entry per ply.
    ///
    /// # Errors
    /// Returns the parse error of the first move that is malformed or illegal;
    /// moves before it stay in the book.
    pub fn insert_line(&mut self, start: &Position, moves: &[&str]) -> Result<(), MoveParseError> {
        let mut pos = *start;
        for text in moves {
            let mv = pos.parse_move(text)?;
            self.insert(&pos, mv);
            pos.apply_move(mv);
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpeningBook for HashBook {
    fn lookup(&self, pos: &Position) -> Vec<Move> {
        self.entries.get(&pos.hash()).cloned().unwrap_or_default()
    }
}
