//! Search constants.
//!
//! Score scale, mate bounds and move-ordering priorities. Tunable margins
//! live in [`SearchParams`](super::SearchParams).

use crate::board::MAX_PLY;

// ============================================================================
// SCORES
// ============================================================================

/// Score of "mated right now". Mated in `n` plies is `-MATE + n`.
pub const MATE: i32 = 32000;

/// Scores with absolute value >= this are mate scores
pub const MATE_THRESHOLD: i32 = MATE - 2 * MAX_PLY as i32;

/// Wider than any reachable score; the initial root window.
pub const INFINITY: i32 = MATE + 1;

pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. TT > good captures > killers > quiets > bad captures

/// Hash move (from transposition table) - highest priority
pub const TT_MOVE_SCORE: i32 = 1_000_000;

/// Captures and promotions that do not lose material, plus MVV-LVA
pub const GOOD_CAPTURE_SCORE: i32 = 200_000;

/// First killer move (quiet that caused beta cutoff at same ply)
pub const KILLER1_SCORE: i32 = 100_000;

/// Second killer move (replaced killer)
pub const KILLER2_SCORE: i32 = 90_000;

/// Captures the exchange evaluator says lose material, plus MVV-LVA
pub const BAD_CAPTURE_SCORE: i32 = -100_000;

// ============================================================================
// REDUCTIONS
// ============================================================================

/// LMR reduction table dimensions (depth x move index buckets)
pub const LMR_TABLE_MAX_DEPTH: usize = 64;
pub const LMR_TABLE_MAX_IDX: usize = 256;

/// Default depth when a search has no depth limit.
pub const MAX_SEARCH_DEPTH: u32 = MAX_PLY as u32 - 8;
