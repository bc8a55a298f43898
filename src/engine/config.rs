//! Engine-level configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tt::DEFAULT_TT_MB;

/// Settings a front end can change between searches.
///
/// With the `serde` feature enabled this loads from any serde format; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Transposition table size in megabytes
    pub hash_mb: usize,
    /// Time to reserve for move overhead (communication latency, etc.)
    pub move_overhead_ms: u64,
    /// Safety reserve kept back on the last move before the time control
    pub min_reserve_percent: u64,
    /// Safety reserve kept back with `default_moves_to_go` or more moves left
    pub max_reserve_percent: u64,
    /// Moves-to-go estimate when the front end does not send one
    pub default_moves_to_go: u64,
    /// Hard limit, in average-move budgets
    pub hard_cap_moves: u64,
    /// Consult the opening book before searching
    pub use_book: bool,
    /// Seed for choosing among book moves
    pub book_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hash_mb: DEFAULT_TT_MB,
            move_overhead_ms: 50,
            min_reserve_percent: 2,
            max_reserve_percent: 10,
            default_moves_to_go: 30,
            hard_cap_moves: 3,
            use_book: true,
            book_seed: 0x5EED,
        }
    }
}
