//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening over a validated root move list
//! - Alpha-beta search with PVS
//! - Razoring, reverse futility pruning and null move pruning
//! - Internal iterative deepening (IID)
//! - Late move reductions (LMR)
//! - Check extension and mate distance pruning
//! - Quiescence search with SEE and delta pruning

mod iterative;
mod pruning;
mod quiescence;

use std::sync::OnceLock;

use crate::sync::StopFlag;
use crate::timer::SearchClock;
use crate::tt::{value_from_tt, value_to_tt, BoundType};

use super::constants::{DRAW_SCORE, INFINITY, LMR_TABLE_MAX_DEPTH, LMR_TABLE_MAX_IDX, MATE};
use super::move_order::{order_moves, OrderingHints};
use super::SearchState;
use crate::board::eval::Evaluator;
use crate::board::stack::PositionStack;
use crate::board::types::{Move, MoveList, MAX_PLY};

/// Search context for a single search
pub(super) struct SearchContext<'a> {
    stack: &'a mut PositionStack,
    state: &'a mut SearchState,
    evaluator: &'a dyn Evaluator,
    clock: &'a SearchClock,
    stop: &'a StopFlag,
    node_limit: u64,
    nodes: u64,
    seldepth: usize,
    /// Stack index of the root position
    root_ply: usize,
    /// Latched once a stop condition is seen, so every frame unwinds
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub(super) fn new(
        stack: &'a mut PositionStack,
        state: &'a mut SearchState,
        evaluator: &'a dyn Evaluator,
        clock: &'a SearchClock,
        stop: &'a StopFlag,
        node_limit: u64,
    ) -> Self {
        let root_ply = stack.ply();
        SearchContext {
            stack,
            state,
            evaluator,
            clock,
            stop,
            node_limit,
            nodes: 0,
            seldepth: 0,
            root_ply,
            aborted: false,
        }
    }

    /// Precomputed LMR table
    #[allow(clippy::cast_precision_loss)]
    fn lmr_table() -> &'static [[i32; LMR_TABLE_MAX_IDX]; LMR_TABLE_MAX_DEPTH] {
        static TABLE: OnceLock<[[i32; LMR_TABLE_MAX_IDX]; LMR_TABLE_MAX_DEPTH]> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut t = [[0i32; LMR_TABLE_MAX_IDX]; LMR_TABLE_MAX_DEPTH];
            for (depth, row) in t.iter_mut().enumerate().skip(1) {
                for (idx, cell) in row.iter_mut().enumerate().skip(1) {
                    let val = (0.53 + (depth as f64).ln() * (idx as f64).ln() / 2.44).floor();
                    *cell = val.max(0.0) as i32;
                }
            }
            t
        })
    }

    fn lmr_reduction(depth: i32, move_number: usize) -> i32 {
        let d = (depth.max(0) as usize).min(LMR_TABLE_MAX_DEPTH - 1);
        let i = move_number.min(LMR_TABLE_MAX_IDX - 1);
        Self::lmr_table()[d][i]
    }

    /// Distance from the search root.
    #[inline]
    fn ply(&self) -> usize {
        self.stack.ply() - self.root_ply
    }

    #[inline]
    fn evaluate(&self) -> i32 {
        self.evaluator.evaluate(self.stack.current())
    }

    /// Poll the stop flag and node limit. Once true, stays true.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if !self.aborted
            && (self.stop.is_stopped() || (self.node_limit > 0 && self.nodes >= self.node_limit))
        {
            self.aborted = true;
        }
        self.aborted
    }

    fn is_draw(&self) -> bool {
        let pos = self.stack.current();
        self.stack.is_repetition() || pos.is_fifty_move_draw() || pos.insufficient_material()
    }

    /// Interior node search. `depth` is the remaining depth in plies.
    #[allow(clippy::too_many_lines)]
    pub(super) fn alphabeta(&mut self, mut depth: i32, mut alpha: i32, mut beta: i32, allow_null: bool) -> i32 {
        let ply = self.ply();
        let is_pv = beta - alpha > 1;
        self.nodes += 1;
        self.seldepth = self.seldepth.max(ply);

        // (a) limits
        if self.should_stop() || ply >= MAX_PLY - 1 {
            return self.evaluate();
        }

        // (b) draws, including at the horizon
        if self.is_draw() {
            return DRAW_SCORE;
        }

        let in_check = self.stack.current().checkers().any();
        if in_check {
            depth += 1;
        }
        if depth <= 0 {
            return self.quiescence(alpha, beta, 0);
        }

        // (c) mate distance pruning
        alpha = alpha.max(-MATE + ply as i32);
        beta = beta.min(MATE - ply as i32 - 1);
        if alpha >= beta {
            return alpha;
        }

        // (d) transposition table
        let hash = self.stack.current().hash();
        let mut tt_move = None;
        if let Some(entry) = self.state.tt.probe(hash) {
            tt_move = entry.best_move();
            if !is_pv && entry.depth() >= depth as u32 {
                let score = value_from_tt(entry.score(), ply);
                match entry.bound_type() {
                    BoundType::Exact => return score,
                    BoundType::LowerBound if score >= beta => return score,
                    BoundType::UpperBound if score <= alpha => return score,
                    _ => {}
                }
            }
        }

        // (e) forward pruning
        let static_eval = if in_check { -INFINITY } else { self.evaluate() };
        if !in_check && !is_pv && self.has_pruning_material() {
            if let Some(score) = self.prune_before_moves(depth, alpha, beta, static_eval, allow_null) {
                return score;
            }
            if self.aborted {
                return alpha;
            }
        }

        // (f) internal iterative deepening
        if tt_move.is_none() && !in_check && depth >= self.state.params.iid_min_depth {
            self.alphabeta(depth - self.state.params.iid_reduction, alpha, beta, allow_null);
            if self.aborted {
                return alpha;
            }
            tt_move = self.state.tt.probe(hash).and_then(|e| e.best_move());
        }

        // (g) generate and order
        let mut moves = MoveList::new();
        let pos = self.stack.current();
        let us = pos.side_to_move();
        let pinned = pos.pinned(us) & pos.occupancy(us);
        pos.generate_moves(&mut moves);
        {
            let state = &mut *self.state;
            let hints = OrderingHints {
                tt_move,
                killers: &state.killers,
                history: &state.history,
                ply,
            };
            order_moves(pos, &moves, &hints, &mut state.buffers[ply]);
        }

        // (h) move loop
        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move: Option<Move> = None;
        let mut legal = 0usize;
        let mut quiets_tried = MoveList::new();

        let mut idx = 0;
        while let Some(scored) = self.state.buffers[ply].get(idx) {
            idx += 1;
            let mv = scored.mv;
            let pos = self.stack.current();
            if !pos.is_legal(mv, pinned) {
                continue;
            }
            legal += 1;
            let is_quiet = mv.is_quiet();
            let gives_check = pos.gives_check(mv);
            let is_killer = self.state.killers.contains(ply, mv);

            self.stack.push_move(mv);
            let score = if legal == 1 {
                -self.alphabeta(depth - 1, -beta, -alpha, true)
            } else {
                let params = &self.state.params;
                let mut reduction = 0;
                if depth >= params.lmr_min_depth
                    && legal > params.lmr_min_move
                    && is_quiet
                    && !gives_check
                    && !in_check
                    && !is_killer
                {
                    reduction = Self::lmr_reduction(depth, legal) - i32::from(is_pv);
                    reduction = reduction.min(depth - 2).max(0);
                }

                let mut score = -self.alphabeta(depth - 1 - reduction, -alpha - 1, -alpha, true);
                if score > alpha && reduction > 0 {
                    score = -self.alphabeta(depth - 1, -alpha - 1, -alpha, true);
                }
                if score > alpha && score < beta {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, true);
                }
                score
            };
            self.stack.pop();

            if self.aborted {
                return alpha;
            }

            if score > best_score {
                best_score = score;
                if score > alpha {
                    best_move = Some(mv);
                    if score >= beta {
                        if is_quiet {
                            self.record_quiet_cutoff(mv, depth, ply, &quiets_tried);
                        }
                        break;
                    }
                    alpha = score;
                }
            }
            if is_quiet {
                quiets_tried.push(mv);
            }
        }

        // (i) terminal positions and cache store
        if legal == 0 {
            return if in_check { -MATE + ply as i32 } else { DRAW_SCORE };
        }

        let bound = if best_score >= beta {
            BoundType::LowerBound
        } else if best_score > original_alpha {
            BoundType::Exact
        } else {
            BoundType::UpperBound
        };
        self.state
            .tt
            .store(hash, depth as u32, value_to_tt(best_score, ply), bound, best_move);

        best_score
    }

    fn record_quiet_cutoff(&mut self, mv: Move, depth: i32, ply: usize, tried: &MoveList) {
        let side = self.stack.current().side_to_move();
        let max = self.state.params.history_max;
        self.state.killers.update(ply, mv);
        self.state.history.update(side, mv, depth, max);
        for &quiet in tried {
            self.state.history.penalize(side, quiet, depth, max);
        }
    }

    fn has_pruning_material(&self) -> bool {
        let pos = self.stack.current();
        pos.non_pawn_material(pos.side_to_move()) >= self.state.params.null_min_material
    }
}
