//! Ply-indexed arena of position snapshots.
//!
//! Entry `ply` is the current position; every shallower entry is an ancestor.
//! Making a move copies the current entry into the next slot and applies the
//! move there; unmaking is just `ply -= 1`. Slots above the current ply are
//! scratch space for the next recursive call.

use super::position::Position;
use super::types::{Move, MAX_PLY};

/// Game plies kept before the search root for repetition detection.
pub const MAX_GAME_HISTORY: usize = 512;

const STACK_CAPACITY: usize = MAX_GAME_HISTORY + MAX_PLY + 8;

#[derive(Clone, Debug)]
pub struct PositionStack {
    entries: Box<[Position]>,
    ply: usize,
}

impl PositionStack {
    #[must_use]
    pub fn new(root: Position) -> Self {
        PositionStack {
            entries: vec![root; STACK_CAPACITY].into_boxed_slice(),
            ply: 0,
        }
    }

    /// Drop all history and start over from `root`.
    pub fn reset(&mut self, root: Position) {
        self.entries[0] = root;
        self.ply = 0;
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> &Position {
        &self.entries[self.ply]
    }

    /// Index of the current entry. Search plies are measured relative to the
    /// index at which the search started.
    #[inline]
    #[must_use]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Push the position reached by `mv`.
    ///
    /// # Panics
    /// Panics if the stack is full; running past the fixed capacity would
    /// mean the search ignored its own ply limit.
    #[inline]
    pub fn push_move(&mut self, mv: Move) {
        let next = self.next_slot();
        next.apply_move(mv);
        self.ply += 1;
    }

    #[inline]
    pub fn push_null(&mut self) {
        let next = self.next_slot();
        next.apply_null_move();
        self.ply += 1;
    }

    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(self.ply > 0, "pop past the bottom of the position stack");
        self.ply -= 1;
    }

    fn next_slot(&mut self) -> &mut Position {
        assert!(
            self.ply + 1 < self.entries.len(),
            "position stack overflow at ply {}",
            self.ply
        );
        let (head, tail) = self.entries.split_at_mut(self.ply + 1);
        tail[0] = head[self.ply];
        &mut tail[0]
    }

    /// Play a game move: like [`push_move`](Self::push_move), but history that
    /// can no longer repeat is discarded so the stack never fills up between
    /// searches.
    pub fn play(&mut self, mv: Move) {
        self.push_move(mv);
        if self.current().reversible_plies == 0 {
            self.entries[0] = self.entries[self.ply];
            self.ply = 0;
        } else if self.ply >= MAX_GAME_HISTORY {
            self.entries.copy_within(1..=self.ply, 0);
            self.ply -= 1;
        }
    }

    /// Number of earlier positions on the stack that equal the current one.
    ///
    /// Only entries inside the current run of reversible plies are compared,
    /// stepping two plies at a time since the side to move must match. The
    /// nearest candidate is four plies back: a position cannot recur after
    /// one move by each side.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        let pos = self.current();
        let window = (pos.reversible_plies as usize).min(self.ply);
        (4..=window)
            .step_by(2)
            .filter(|&back| self.entries[self.ply - back].hash == pos.hash)
            .count()
    }

    /// Stops at the first match; this is the check the search runs at every node.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        let pos = self.current();
        let window = (pos.reversible_plies as usize).min(self.ply);
        (4..=window)
            .step_by(2)
            .any(|back| self.entries[self.ply - back].hash == pos.hash)
    }

    /// The current position has occurred at least twice before.
    #[must_use]
    pub fn is_third_repetition(&self) -> bool {
        self.repetitions() >= 2
    }
}
