//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with principal-variation search at the root
//! - Razoring, reverse futility and null move pruning
//! - Internal iterative deepening and late move reductions
//! - Check extension and mate distance pruning
//! - Quiescence search with stand-pat, delta and SEE pruning
//! - Move ordering (TT move, MVV-LVA/SEE, killers, history)
//! - Transposition table for move ordering and cutoffs

pub mod constants;
mod move_order;
mod params;
mod pvs;

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sync::StopFlag;
use crate::timer::SearchClock;
use crate::tt::{TranspositionTable, DEFAULT_TT_MB};

use super::eval::Evaluator;
use super::stack::PositionStack;
use super::types::{Color, ColoredPiece, Move, ScoredMoveList, EMPTY_MOVE, MAX_PLY};
pub use move_order::{mvv_lva, piece_value};
pub use params::SearchParams;

/// Result of a search containing best move and ponder move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found; `None` only when the root has no legal move
    pub best_move: Option<Move>,
    /// The expected opponent reply (for pondering)
    pub ponder_move: Option<Move>,
    /// Score of the last completed iteration, side to move's view
    pub score: i32,
    /// Depth of the last completed iteration
    pub depth: u32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

pub struct KillerTable {
    slots: [[Move; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[EMPTY_MOVE; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |row| row[0])
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Move {
        self.slots.get(ply).map_or(EMPTY_MOVE, |row| row[1])
    }

    #[must_use]
    pub fn contains(&self, ply: usize, mv: Move) -> bool {
        self.primary(ply) == mv || self.secondary(ply) == mv
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0] != mv {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = mv;
        }
    }

    pub fn reset(&mut self) {
        for killers in &mut self.slots {
            *killers = [EMPTY_MOVE; 2];
        }
    }
}

/// Quiet-move history indexed by moving piece and destination square.
pub struct HistoryTable {
    entries: [[i32; 64]; 12],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            entries: [[0; 64]; 12],
        }
    }

    #[inline]
    fn slot(side: Color, mv: Move) -> (usize, usize) {
        (ColoredPiece::new(side, mv.piece()).index(), mv.to().index())
    }

    #[must_use]
    pub fn score(&self, side: Color, mv: Move) -> i32 {
        let (piece, to) = Self::slot(side, mv);
        self.entries[piece][to]
    }

    /// Reward a quiet move that caused a beta cutoff
    pub fn update(&mut self, side: Color, mv: Move, depth: i32, max: i32) {
        let (piece, to) = Self::slot(side, mv);
        let entry = &mut self.entries[piece][to];
        *entry = (*entry + depth * depth).min(max);
    }

    /// Penalize a quiet move that was searched before the cutoff move
    pub fn penalize(&mut self, side: Color, mv: Move, depth: i32, max: i32) {
        let (piece, to) = Self::slot(side, mv);
        let entry = &mut self.entries[piece][to];
        *entry = (*entry - depth * depth).max(-max);
    }

    pub fn decay(&mut self) {
        for row in &mut self.entries {
            for entry in row {
                *entry /= 4;
            }
        }
    }

    pub fn reset(&mut self) {
        self.entries = [[0; 64]; 12];
    }
}

/// Search state persisted across searches of one game.
pub struct SearchState {
    pub tt: TranspositionTable,
    pub killers: KillerTable,
    pub history: HistoryTable,
    /// One ordering buffer per ply, reused by every node at that ply
    buffers: Box<[ScoredMoveList]>,
    params: SearchParams,
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_mb),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            buffers: vec![ScoredMoveList::new(); MAX_PLY].into_boxed_slice(),
            params: SearchParams::default(),
        }
    }

    /// Forget everything learned so far (new game).
    pub fn reset(&mut self) {
        self.tt.clear();
        self.killers.reset();
        self.history.reset();
    }

    pub fn resize_tt(&mut self, tt_mb: usize) {
        self.tt.resize(tt_mb);
    }

    /// Called once per `go`: ages the table, clears killers and decays history.
    pub fn new_search(&mut self) {
        self.tt.new_search();
        self.killers.reset();
        self.history.decay();
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    #[must_use]
    pub fn hashfull(&self) -> u32 {
        self.tt.hashfull()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::new(DEFAULT_TT_MB)
    }
}

/// Limits for one `go`, as a protocol front end would pass them.
///
/// Times are in milliseconds. Unset fields impose no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub infinite: bool,
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn movetime(ms: u64) -> Self {
        SearchLimits {
            movetime: Some(ms),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn infinite() -> Self {
        SearchLimits {
            infinite: true,
            ..Default::default()
        }
    }

    /// Remaining time and increment for `side`, if a clock was given.
    #[must_use]
    pub fn clock_for(&self, side: Color) -> Option<(u64, u64)> {
        let (time, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        time.map(|t| (t, inc.unwrap_or(0)))
    }
}

/// Configuration for a search operation.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = until stopped)
    pub max_depth: Option<u32>,
    /// Node limit (0 = unlimited)
    pub node_limit: u64,
    /// Keep deepening after a forced mate is found
    pub infinite: bool,
    /// Optional callback for iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Depth, node and infinite settings of `limits`; time is handled by the clock.
    #[must_use]
    pub fn from_limits(limits: &SearchLimits) -> Self {
        SearchConfig {
            max_depth: limits.depth,
            node_limit: limits.nodes.unwrap_or(0),
            infinite: limits.infinite,
            info_callback: None,
        }
    }

    /// Set node limit
    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Attach a callback for iteration info reporting.
    #[must_use]
    pub fn with_info_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub seldepth: u32,
    pub score: i32,
    /// Moves (not plies) to mate; negative when being mated
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    /// Transposition table fill, per mille
    pub hashfull: u32,
    pub pv: Vec<Move>,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Run an iterative deepening search from the top of `stack`.
///
/// The stack is left exactly as it was passed in. Time is governed by
/// `clock` (and whatever timer raises `stop`); depth and node limits by
/// `config`. Returns the result of the last completed iteration.
pub fn search(
    stack: &mut PositionStack,
    state: &mut SearchState,
    evaluator: &dyn Evaluator,
    config: &SearchConfig,
    clock: &SearchClock,
    stop: &StopFlag,
) -> SearchResult {
    let root_ply = stack.ply();
    log::debug!(
        "search start: fen {} max_depth {:?} nodes {}",
        stack.current().to_fen(),
        config.max_depth,
        config.node_limit
    );

    let mut ctx = pvs::SearchContext::new(stack, state, evaluator, clock, stop, config.node_limit);
    let result = ctx.iterative_deepening(config);

    debug_assert_eq!(stack.ply(), root_ply, "search must leave the stack unchanged");
    log::debug!(
        "search done: best {:?} score {} depth {} nodes {} stopped by {:?}",
        result.best_move,
        result.score,
        result.depth,
        result.nodes,
        stop.reason()
    );
    result
}
