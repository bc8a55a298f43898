//! Time allocation for one search.
//!
//! Turns the clock fields of [`SearchLimits`] into a [`TimeBudget`]: either a
//! fixed time per move, or soft/hard limits derived from the remaining time,
//! increment and an estimate of the moves left until the next time control.

use crate::board::{Color, SearchLimits};

use super::config::EngineConfig;

/// How long a search may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBudget {
    /// No time limit (depth, nodes, infinite, or nothing given)
    #[default]
    Unlimited,
    /// Fixed time per move
    Fixed { budget_ms: u64 },
    /// Remaining time plus increment: aim for `soft_ms`, never pass `hard_ms`
    Variable { soft_ms: u64, hard_ms: u64 },
}

impl TimeBudget {
    /// Check if this budget imposes no time limit.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, TimeBudget::Unlimited)
    }
}

/// Compute the budget for `side` to move under `limits`.
///
/// `movetime` wins over clock fields; `infinite` disables both.
#[must_use]
pub fn compute_budget(limits: &SearchLimits, side: Color, config: &EngineConfig) -> TimeBudget {
    if limits.infinite {
        return TimeBudget::Unlimited;
    }

    if let Some(movetime) = limits.movetime {
        let budget_ms = movetime.saturating_sub(config.move_overhead_ms).max(1);
        log::debug!("fixed budget {budget_ms} ms (movetime {movetime})");
        return TimeBudget::Fixed { budget_ms };
    }

    let Some((remaining, inc)) = limits.clock_for(side) else {
        return TimeBudget::Unlimited;
    };
    let budget = compute_variable(remaining, inc, limits.movestogo, config);
    log::debug!("time budget {budget:?} (remaining {remaining}, inc {inc}, movestogo {:?})", limits.movestogo);
    budget
}

/// Soft and hard limits for the remaining-time mode.
fn compute_variable(remaining: u64, inc: u64, movestogo: Option<u64>, config: &EngineConfig) -> TimeBudget {
    let default_mtg = config.default_moves_to_go.max(1);
    let moves_to_go = movestogo.unwrap_or(default_mtg).max(1);

    // The reserve shrinks from max to min as the time control approaches.
    let span = config.max_reserve_percent.saturating_sub(config.min_reserve_percent);
    let reserve_percent =
        config.min_reserve_percent + span * moves_to_go.min(default_mtg) / default_mtg;
    let reserve_percent = reserve_percent.min(100);

    let usable = remaining.saturating_sub(config.move_overhead_ms) * (100 - reserve_percent) / 100;
    let usable = usable.max(1);

    let average = usable / moves_to_go + inc;
    let soft_ms = average.min(usable).max(1);
    let hard_ms = average
        .saturating_mul(config.hard_cap_moves.max(1))
        .min(usable)
        .max(soft_ms);

    TimeBudget::Variable { soft_ms, hard_ms }
}
