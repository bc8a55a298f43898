use super::super::constants::{INFINITY, MATE};
use super::super::move_order::{order_captures, piece_value};
use super::SearchContext;
use crate::board::movegen::Promotions;
use crate::board::types::{MoveList, Piece, MAX_PLY};

impl SearchContext<'_> {
    /// Quiescence search for tactical stability with SEE and delta pruning.
    ///
    /// `qply` counts plies since the main search ran out of depth; quiet
    /// checks are only tried at `qply == 0`.
    pub(super) fn quiescence(&mut self, mut alpha: i32, beta: i32, qply: u32) -> i32 {
        let ply = self.ply();
        self.nodes += 1;
        self.seldepth = self.seldepth.max(ply);

        if self.should_stop() || ply >= MAX_PLY - 1 {
            return self.evaluate();
        }

        let pos = self.stack.current();
        let in_check = pos.checkers().any();
        let us = pos.side_to_move();
        let pinned = pos.pinned(us) & pos.occupancy(us);

        let stand_pat = if in_check { -INFINITY } else { self.evaluate() };
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);
        let mut best_score = stand_pat;

        let mut moves = MoveList::new();
        if in_check {
            pos.generate_evasions(&mut moves);
        } else {
            pos.generate_captures(&mut moves, Promotions::QueenOnly);
            if qply == 0 {
                pos.generate_checks(&mut moves);
            }
        }
        order_captures(&moves, &mut self.state.buffers[ply]);

        let delta_margin = self.state.params.delta_margin;
        let mut legal = 0usize;
        let mut idx = 0;
        while let Some(scored) = self.state.buffers[ply].get(idx) {
            idx += 1;
            let mv = scored.mv;
            let pos = self.stack.current();
            if !pos.is_legal(mv, pinned) {
                continue;
            }
            legal += 1;

            if !in_check {
                // Delta pruning: even winning the victim outright stays below alpha.
                if mv.is_capture() && !mv.is_promotion() {
                    let gain = mv.captured().map_or(0, piece_value);
                    if stand_pat + gain + delta_margin < alpha {
                        continue;
                    }
                }
                if mv.piece() != Piece::King && !pos.see_ge(mv, 0) {
                    continue;
                }
            }

            self.stack.push_move(mv);
            let score = -self.quiescence(-beta, -alpha, qply + 1);
            self.stack.pop();

            if self.aborted {
                return alpha;
            }

            if score > best_score {
                best_score = score;
                if score >= beta {
                    return score;
                }
                if score > alpha {
                    alpha = score;
                }
            }
        }

        if in_check && legal == 0 {
            return -MATE + ply as i32;
        }
        best_score
    }
}
