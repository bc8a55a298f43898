use super::super::constants::{INFINITY, MATE, MATE_THRESHOLD, MAX_SEARCH_DEPTH};
use super::super::move_order::{order_moves, OrderingHints};
use super::super::{SearchConfig, SearchIterationInfo, SearchResult};
use super::SearchContext;
use crate::board::types::{Move, MoveList, MAX_PLY};
use crate::tt::{value_to_tt, BoundType};

/// Outcome of one root iteration.
struct RootOutcome {
    best_move: Move,
    score: i32,
}

impl SearchContext<'_> {
    /// Iterative deepening: search depth 1, 2, ... until a limit is hit,
    /// keeping only results of iterations that ran to completion.
    pub(in crate::board::search) fn iterative_deepening(&mut self, config: &SearchConfig) -> SearchResult {
        let mut root_moves = self.initial_root_order();
        if root_moves.is_empty() {
            let score = if self.stack.current().checkers().any() { -MATE } else { 0 };
            return SearchResult {
                score,
                ..SearchResult::default()
            };
        }

        let max_depth = config.max_depth.unwrap_or(MAX_SEARCH_DEPTH).clamp(1, MAX_SEARCH_DEPTH);
        let mut result = SearchResult {
            best_move: root_moves.first().copied(),
            ..SearchResult::default()
        };
        let mut previous_best: Option<Move> = None;

        for depth in 1..=max_depth {
            if self.should_stop() {
                break;
            }
            if depth > 1 && !config.infinite && self.clock.soft_passed() {
                log::trace!("soft limit passed before depth {depth}");
                break;
            }

            self.refresh_root_moves(&mut root_moves);
            self.seldepth = 0;
            let Some(outcome) = self.search_root(depth as i32, &mut root_moves) else {
                break;
            };

            let changed = previous_best.is_some_and(|mv| mv != outcome.best_move);
            self.clock.record_iteration(changed);
            previous_best = Some(outcome.best_move);

            let pv = self.extract_pv(outcome.best_move);
            result = SearchResult {
                best_move: Some(outcome.best_move),
                ponder_move: pv.get(1).copied(),
                score: outcome.score,
                depth,
                nodes: self.nodes,
                pv,
            };
            self.report_iteration(&result, config);

            if !config.infinite && outcome.score.abs() >= MATE_THRESHOLD {
                let mate_plies = MATE - outcome.score.abs();
                if mate_plies <= depth as i32 {
                    break;
                }
            }
            if root_moves.len() == 1 && !config.infinite && self.clock.has_budget() {
                break;
            }
        }

        result.nodes = self.nodes;
        result
    }

    /// Legal root moves in ordering-heuristic order.
    fn initial_root_order(&mut self) -> Vec<Move> {
        let pos = self.stack.current();
        let legal = pos.legal_moves();
        let tt_move = self.state.tt.probe(pos.hash()).and_then(|e| e.best_move());
        let state = &mut *self.state;
        let hints = OrderingHints {
            tt_move,
            killers: &state.killers,
            history: &state.history,
            ply: 0,
        };
        order_moves(pos, &legal, &hints, &mut state.buffers[0]);
        state.buffers[0].iter().map(|s| s.mv).collect()
    }

    /// Re-validate the root list against freshly generated legal moves,
    /// keeping the previous iteration's order.
    fn refresh_root_moves(&self, root_moves: &mut Vec<Move>) {
        let legal: MoveList = self.stack.current().legal_moves();
        root_moves.retain(|&mv| legal.contains(mv));
        for &mv in &legal {
            if !root_moves.contains(&mv) {
                root_moves.push(mv);
            }
        }
    }

    /// Full-window PVS over the root moves. Returns `None` if the iteration
    /// was cut short; on success the best move is moved to the front.
    fn search_root(&mut self, depth: i32, root_moves: &mut [Move]) -> Option<RootOutcome> {
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(usize, i32)> = None;

        for (i, &mv) in root_moves.iter().enumerate() {
            self.nodes += 1;
            self.stack.push_move(mv);
            let score = if i == 0 {
                -self.alphabeta(depth - 1, -beta, -alpha, true)
            } else {
                let mut score = -self.alphabeta(depth - 1, -alpha - 1, -alpha, true);
                if score > alpha && !self.aborted {
                    score = -self.alphabeta(depth - 1, -beta, -alpha, true);
                }
                score
            };
            self.stack.pop();

            if self.aborted {
                return None;
            }
            if score > alpha {
                alpha = score;
                best = Some((i, score));
            }
        }

        let (idx, score) = best?;
        root_moves[..=idx].rotate_right(1);
        let best_move = root_moves[0];
        let hash = self.stack.current().hash();
        self.state
            .tt
            .store(hash, depth as u32, value_to_tt(score, 0), BoundType::Exact, Some(best_move));
        Some(RootOutcome { best_move, score })
    }

    /// Walk cached best moves from the root, checking each one, until the
    /// table runs dry, a move fails validation or the line repeats.
    fn extract_pv(&mut self, first: Move) -> Vec<Move> {
        let mut pv = vec![first];
        self.stack.push_move(first);

        while pv.len() < MAX_PLY - 1 && !self.stack.is_repetition() {
            let pos = self.stack.current();
            let Some(mv) = self.state.tt.probe(pos.hash()).and_then(|e| e.best_move()) else {
                break;
            };
            let us = pos.side_to_move();
            if !pos.is_pseudo_legal(mv) || !pos.is_legal(mv, pos.pinned(us) & pos.occupancy(us)) {
                break;
            }
            pv.push(mv);
            self.stack.push_move(mv);
        }

        for _ in 0..pv.len() {
            self.stack.pop();
        }
        pv
    }

    fn report_iteration(&self, result: &SearchResult, config: &SearchConfig) {
        let time_ms = self.clock.elapsed_ms();
        let nps = if time_ms > 0 {
            self.nodes * 1000 / time_ms
        } else {
            0
        };
        let info = SearchIterationInfo {
            depth: result.depth,
            seldepth: self.seldepth as u32,
            score: result.score,
            mate_in: mate_in(result.score),
            nodes: self.nodes,
            nps,
            time_ms,
            hashfull: self.state.hashfull(),
            pv: result.pv.clone(),
        };
        let pv_str = info.pv.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        log::info!(
            "depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
            info.depth,
            info.seldepth,
            info.score,
            info.nodes,
            info.nps,
            info.time_ms,
            pv_str
        );
        if let Some(cb) = &config.info_callback {
            cb(&info);
        }
    }
}

/// Full moves to mate for a mate score: positive when mating.
fn mate_in(score: i32) -> Option<i32> {
    if score.abs() < MATE_THRESHOLD {
        None
    } else if score > 0 {
        Some((MATE - score + 1) / 2)
    } else {
        Some(-(MATE + score) / 2)
    }
}
