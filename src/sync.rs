//! Cross-thread search control.
//!
//! A [`StopFlag`] is shared between the searching thread, the timer thread
//! and whatever front end drives the engine. Besides "stop now" it records
//! who asked, so a finished search can say why it ended.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Why a search was told to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A front end or another thread called [`StopFlag::stop`].
    External,
    /// The hard time limit ran out.
    Time,
}

impl StopReason {
    const fn to_raw(self) -> u8 {
        match self {
            StopReason::External => 1,
            StopReason::Time => 2,
        }
    }

    const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(StopReason::External),
            2 => Some(StopReason::Time),
            _ => None,
        }
    }
}

/// Shared "stop searching" signal.
///
/// Clones share one flag. The search polls it at every node; the first
/// reason raised sticks until [`reset`](StopFlag::reset).
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicU8>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag that is already raised, as if stopped externally.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicU8::new(StopReason::External.to_raw())))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed) != 0
    }

    /// The reason the flag was raised, if it was.
    #[must_use]
    pub fn reason(&self) -> Option<StopReason> {
        StopReason::from_raw(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn stop(&self) {
        self.stop_with(StopReason::External);
    }

    /// Raise the flag unless it is already raised.
    pub fn stop_with(&self, reason: StopReason) {
        let _ = self
            .0
            .compare_exchange(0, reason.to_raw(), Ordering::Relaxed, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());
        assert_eq!(flag.reason(), None);

        flag.stop();
        assert!(flag.is_stopped());
        assert_eq!(flag.reason(), Some(StopReason::External));

        flag.reset();
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = StopFlag::new();
        let other = flag.clone();
        other.stop_with(StopReason::Time);
        assert!(flag.is_stopped());
        assert_eq!(flag.reason(), Some(StopReason::Time));
    }

    #[test]
    fn test_first_reason_wins() {
        let flag = StopFlag::new();
        flag.stop_with(StopReason::Time);
        flag.stop();
        assert_eq!(flag.reason(), Some(StopReason::Time));
    }

    #[test]
    fn test_stopped_constructor() {
        assert_eq!(StopFlag::stopped().reason(), Some(StopReason::External));
    }

    #[test]
    fn test_stop_seen_across_threads() {
        let flag = StopFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.stop()).join().unwrap();
        assert!(flag.is_stopped());
    }
}
