//! Engine facade for protocol front ends.
//!
//! A front end (UCI, `XBoard`, a GUI) owns one [`Engine`] per game, feeds it
//! positions and limits, and reports the [`SearchResult`](crate::board::SearchResult).
//! Time allocation lives in [`time`].

mod config;
mod controller;
pub mod time;

pub use config::EngineConfig;
pub use controller::Engine;
pub use time::{compute_budget, TimeBudget};
