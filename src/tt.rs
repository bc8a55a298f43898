//! Transposition table for caching search results.
//!
//! One slot per index, addressed by the low hash bits and verified with the
//! high 32 bits. The table is advisory: a collision costs search quality,
//! never correctness, because every cached move is re-validated before use.

use std::mem;

use crate::board::search::constants::{MATE, MATE_THRESHOLD};
use crate::board::Move;

/// Default table size in megabytes.
pub const DEFAULT_TT_MB: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Failed high: score >= beta
    UpperBound, // Failed low: score <= alpha
}

impl BoundType {
    // Never zero, so a packed entry is never all-zero.
    fn to_bits(self) -> u64 {
        match self {
            BoundType::Exact => 1,
            BoundType::LowerBound => 2,
            BoundType::UpperBound => 3,
        }
    }

    fn from_bits(v: u64) -> Self {
        match v & 0x3 {
            2 => BoundType::LowerBound,
            3 => BoundType::UpperBound,
            _ => BoundType::Exact,
        }
    }
}

/// Unpacked entry returned by [`TranspositionTable::probe`].
///
/// The score is still in table form; convert it with [`value_from_tt`]
/// before comparing against a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Option<Move>,
    pub generation: u8,
}

impl TTEntry {
    #[must_use]
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        i32::from(self.score)
    }

    #[must_use]
    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

const MOVE_MASK: u64 = 0xFF_FFFF;
const SCORE_SHIFT: u32 = 24;
const DEPTH_SHIFT: u32 = 40;
const BOUND_SHIFT: u32 = 48;
const GEN_SHIFT: u32 = 50;
const GEN_MASK: u8 = 0x3F;

/// Packed entry format (fits in 64 bits):
/// - bits 0-23:  move (0 = no move)
/// - bits 24-39: score (i16 as u16)
/// - bits 40-47: depth (u8)
/// - bits 48-49: bound (1..=3)
/// - bits 50-55: generation (6 bits)
fn pack_entry(depth: u8, score: i16, bound_type: BoundType, best_move: Option<Move>, generation: u8) -> u64 {
    let mv = best_move.map_or(0, |m| u64::from(m.as_u32()) & MOVE_MASK);
    mv | u64::from(score as u16) << SCORE_SHIFT
        | u64::from(depth) << DEPTH_SHIFT
        | bound_type.to_bits() << BOUND_SHIFT
        | u64::from(generation & GEN_MASK) << GEN_SHIFT
}

fn unpack_entry(data: u64) -> TTEntry {
    let mv_bits = (data & MOVE_MASK) as u32;
    TTEntry {
        depth: (data >> DEPTH_SHIFT) as u8,
        score: (data >> SCORE_SHIFT) as u16 as i16,
        bound_type: BoundType::from_bits(data >> BOUND_SHIFT),
        best_move: (mv_bits != 0).then(|| Move::from_u32(mv_bits)),
        generation: (data >> GEN_SHIFT) as u8 & GEN_MASK,
    }
}

#[derive(Clone, Copy, Default)]
struct TTSlot {
    signature: u32,
    data: u64,
}

impl TTSlot {
    #[inline]
    fn is_empty(self) -> bool {
        self.data == 0
    }

    #[inline]
    fn generation(self) -> u8 {
        (self.data >> GEN_SHIFT) as u8 & GEN_MASK
    }

    #[inline]
    fn depth(self) -> u8 {
        (self.data >> DEPTH_SHIFT) as u8
    }
}

#[inline]
fn signature(hash: u64) -> u32 {
    (hash >> 32) as u32
}

/// Fixed-capacity, power-of-two transposition table.
pub struct TranspositionTable {
    slots: Vec<TTSlot>,
    mask: usize,
    generation: u8,
}

impl TranspositionTable {
    /// Create a table of at most `size_mb` megabytes, rounded down to a
    /// power-of-two slot count.
    ///
    /// # Panics
    /// Aborts if the allocation fails; running without a table is not an option.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let count = Self::slot_count(size_mb);
        TranspositionTable {
            slots: vec![TTSlot::default(); count],
            mask: count - 1,
            generation: 0,
        }
    }

    fn slot_count(size_mb: usize) -> usize {
        if size_mb == 0 {
            log::warn!("transposition table size 0 MB requested, using 1 MB");
        }
        let bytes = size_mb.max(1).saturating_mul(1024 * 1024);
        let count = bytes / mem::size_of::<TTSlot>();
        // Largest power of two not above `count`.
        1usize << (usize::BITS - 1 - count.max(1).leading_zeros())
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Reallocate at a new size. All entries are lost.
    pub fn resize(&mut self, size_mb: usize) {
        let count = Self::slot_count(size_mb);
        log::debug!("transposition table resized to {count} slots ({size_mb} MB requested)");
        self.slots = vec![TTSlot::default(); count];
        self.mask = count - 1;
        self.generation = 0;
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.slots.fill(TTSlot::default());
        self.generation = 0;
    }

    /// Start a new search: entries from earlier searches become stale and
    /// are replaced regardless of depth.
    pub fn new_search(&mut self) {
        self.generation = (self.generation + 1) & GEN_MASK;
    }

    #[must_use]
    pub fn generation(&self) -> u8 {
        self.generation
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Look up `hash`. A signature mismatch reads as no entry.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        let slot = self.slots[self.index(hash)];
        (!slot.is_empty() && slot.signature == signature(hash)).then(|| unpack_entry(slot.data))
    }

    /// Store an entry. `score` must already be in table form (see [`value_to_tt`]).
    ///
    /// The slot is overwritten when the new depth is at least the stored
    /// depth or the stored entry belongs to an earlier search. A store
    /// without a move keeps the move already cached for the same position.
    pub fn store(&mut self, hash: u64, depth: u32, score: i32, bound_type: BoundType, best_move: Option<Move>) {
        let idx = self.index(hash);
        let slot = self.slots[idx];
        let depth = depth.min(u32::from(u8::MAX)) as u8;

        let replace = slot.is_empty() || depth >= slot.depth() || slot.generation() != self.generation;
        if !replace {
            return;
        }

        let sig = signature(hash);
        let best_move = best_move.filter(|m| !m.is_null()).or_else(|| {
            (slot.signature == sig && !slot.is_empty())
                .then(|| unpack_entry(slot.data).best_move)
                .flatten()
        });
        let score = score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        self.slots[idx] = TTSlot {
            signature: sig,
            data: pack_entry(depth, score, bound_type, best_move, self.generation),
        };
    }

    /// Table occupancy in per mille, sampled over the first thousand slots
    /// and counting only entries from the current search.
    #[must_use]
    pub fn hashfull(&self) -> u32 {
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample]
            .iter()
            .filter(|s| !s.is_empty() && s.generation() == self.generation)
            .count();
        (used * 1000 / sample) as u32
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(DEFAULT_TT_MB)
    }
}

/// Convert a search score at `ply` to table form: mate scores become
/// distances from the stored node rather than from the root.
#[inline]
#[must_use]
pub fn value_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score + ply
    } else if score <= -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Inverse of [`value_to_tt`] for a probe at `ply`.
#[inline]
#[must_use]
pub fn value_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        (score - ply).min(MATE)
    } else if score <= -MATE_THRESHOLD {
        (score + ply).max(-MATE)
    } else {
        score
    }
}
