//! Search clock and the watchdog thread that enforces it.
//!
//! The search itself only asks the clock whether the soft limit has passed
//! before starting a new iteration. Everything else is the job of
//! [`SearchTimer`], which polls a few times per second and raises the stop
//! flag when the budget runs out.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::engine::time::TimeBudget;
use crate::sync::{StopFlag, StopReason};

/// Shortest and longest sleep between timer polls
const MIN_POLL_MS: u64 = 5;
const MAX_POLL_MS: u64 = 100;

/// Extra-time multiplier bounds for the variable budget
const BASE_EXTRA_FACTOR: f64 = 1.2;
const VOLATILITY_WEIGHT: f64 = 0.4;
const MAX_EXTRA_FACTOR: f64 = 2.5;

/// Start time, budget and best-move volatility of one search.
///
/// Shared between the search thread, which records iterations, and the
/// timer thread, which reads the extra-time factor.
#[derive(Debug)]
pub struct SearchClock {
    start: Instant,
    budget: TimeBudget,
    volatility: Mutex<f64>,
}

impl SearchClock {
    #[must_use]
    pub fn new(budget: TimeBudget) -> Self {
        SearchClock {
            start: Instant::now(),
            budget,
            volatility: Mutex::new(0.0),
        }
    }

    /// A clock that never runs out.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(TimeBudget::Unlimited)
    }

    #[must_use]
    pub fn budget(&self) -> TimeBudget {
        self.budget
    }

    #[must_use]
    pub fn has_budget(&self) -> bool {
        !self.budget.is_unlimited()
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// The target time is used up: do not start another iteration.
    #[must_use]
    pub fn soft_passed(&self) -> bool {
        match self.budget {
            TimeBudget::Unlimited => false,
            TimeBudget::Fixed { budget_ms } => self.elapsed_ms() >= budget_ms,
            TimeBudget::Variable { soft_ms, .. } => self.elapsed_ms() >= soft_ms,
        }
    }

    /// Record a completed iteration. A change of best move raises the
    /// volatility; stable iterations let it decay.
    pub fn record_iteration(&self, best_changed: bool) {
        let mut volatility = self.volatility.lock();
        *volatility *= 0.5;
        if best_changed {
            *volatility += 1.0;
        }
    }

    /// Multiplier on the soft limit the timer allows before stopping.
    #[must_use]
    pub fn extra_factor(&self) -> f64 {
        let volatility = *self.volatility.lock();
        (BASE_EXTRA_FACTOR + VOLATILITY_WEIGHT * volatility).min(MAX_EXTRA_FACTOR)
    }

    fn poll_interval(&self) -> Duration {
        let reference = match self.budget {
            TimeBudget::Unlimited => MAX_POLL_MS * 10,
            TimeBudget::Fixed { budget_ms } => budget_ms,
            TimeBudget::Variable { soft_ms, .. } => soft_ms,
        };
        Duration::from_millis((reference / 10).clamp(MIN_POLL_MS, MAX_POLL_MS))
    }

    /// Should the search be halted now, given the timer sleeps `interval`
    /// before looking again?
    fn should_halt(&self, interval: Duration) -> bool {
        let elapsed = self.elapsed_ms();
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(MAX_POLL_MS);
        match self.budget {
            TimeBudget::Unlimited => false,
            TimeBudget::Fixed { budget_ms } => elapsed + interval_ms >= budget_ms,
            TimeBudget::Variable { soft_ms, hard_ms } => {
                #[allow(clippy::cast_precision_loss)]
                let extended = soft_ms as f64 * self.extra_factor();
                elapsed as f64 > extended || elapsed >= hard_ms
            }
        }
    }
}

/// Background thread that raises a stop flag when the clock runs out.
///
/// The thread exits as soon as the flag is raised by anyone, or when the
/// timer is finished or dropped; both join it.
pub struct SearchTimer {
    handle: Option<JoinHandle<()>>,
    shutdown: StopFlag,
}

impl SearchTimer {
    /// Start polling `clock`. Returns `None` for an unlimited budget, where
    /// only an external stop ends the search.
    #[must_use]
    pub fn start(clock: Arc<SearchClock>, stop: StopFlag) -> Option<Self> {
        if !clock.has_budget() {
            return None;
        }
        let shutdown = StopFlag::new();
        let shutdown_clone = shutdown.clone();
        let interval = clock.poll_interval();

        let handle = thread::spawn(move || loop {
            if stop.is_stopped() || shutdown_clone.is_stopped() {
                break;
            }
            if clock.should_halt(interval) {
                log::trace!(
                    "timer stop at {} ms (budget {:?}, extra factor {:.2})",
                    clock.elapsed_ms(),
                    clock.budget(),
                    clock.extra_factor()
                );
                stop.stop_with(StopReason::Time);
                break;
            }
            thread::sleep(interval);
        });

        Some(SearchTimer {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Stop the thread (without touching the search flag) and wait for it.
    pub fn finish(mut self) {
        self.join();
    }

    fn join(&mut self) {
        self.shutdown.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_clock_never_passes() {
        let clock = SearchClock::unlimited();
        assert!(!clock.soft_passed());
        assert!(!clock.has_budget());
        assert!(SearchTimer::start(Arc::new(clock), StopFlag::new()).is_none());
    }

    #[test]
    fn test_fixed_budget_raises_flag() {
        let flag = StopFlag::new();
        let clock = Arc::new(SearchClock::new(TimeBudget::Fixed { budget_ms: 30 }));
        let timer = SearchTimer::start(Arc::clone(&clock), flag.clone());
        assert!(timer.is_some());

        thread::sleep(Duration::from_millis(150));
        assert_eq!(flag.reason(), Some(StopReason::Time));
        assert!(clock.soft_passed());
    }

    #[test]
    fn test_hard_limit_raises_flag() {
        let flag = StopFlag::new();
        let clock = Arc::new(SearchClock::new(TimeBudget::Variable {
            soft_ms: 1000,
            hard_ms: 20,
        }));
        let _timer = SearchTimer::start(clock, flag.clone());

        thread::sleep(Duration::from_millis(150));
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_finish_leaves_flag_alone() {
        let flag = StopFlag::new();
        let clock = Arc::new(SearchClock::new(TimeBudget::Fixed { budget_ms: 60_000 }));
        let timer = SearchTimer::start(clock, flag.clone());
        if let Some(timer) = timer {
            timer.finish();
        }
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_volatility_extends_extra_time() {
        let clock = SearchClock::new(TimeBudget::Variable {
            soft_ms: 100,
            hard_ms: 300,
        });
        let calm = clock.extra_factor();
        clock.record_iteration(true);
        clock.record_iteration(true);
        assert!(clock.extra_factor() > calm);
        for _ in 0..20 {
            clock.record_iteration(true);
        }
        assert!(clock.extra_factor() <= MAX_EXTRA_FACTOR);
        for _ in 0..20 {
            clock.record_iteration(false);
        }
        assert!((clock.extra_factor() - BASE_EXTRA_FACTOR).abs() < 0.01);
    }
}
