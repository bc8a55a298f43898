#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable pruning margins and reductions.
///
/// Depths are in plies and margins in centipawns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParams {
    /// Razoring: drop to quiescence when eval + margin * depth < alpha
    pub razor_margin: i32,
    pub razor_max_depth: i32,
    /// Reverse futility: return eval when eval - margin * depth >= beta
    pub rfp_margin: i32,
    pub rfp_max_depth: i32,
    pub null_min_depth: i32,
    pub null_base_reduction: i32,
    pub null_depth_divisor: i32,
    /// Non-pawn material the side to move needs before any forward pruning.
    pub null_min_material: i32,
    pub lmr_min_depth: i32,
    /// Moves tried at full depth before reductions start
    pub lmr_min_move: usize,
    pub iid_min_depth: i32,
    pub iid_reduction: i32,
    /// Quiescence delta pruning margin
    pub delta_margin: i32,
    /// History scores are clamped to +/- this
    pub history_max: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            razor_margin: 300,
            razor_max_depth: 2,
            rfp_margin: 120,
            rfp_max_depth: 6,
            null_min_depth: 3,
            null_base_reduction: 3,
            null_depth_divisor: 6,
            null_min_material: 500,
            lmr_min_depth: 3,
            lmr_min_move: 3,
            iid_min_depth: 5,
            iid_reduction: 2,
            delta_margin: 200,
            history_max: 16_384,
        }
    }
}
