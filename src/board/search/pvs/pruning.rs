use super::super::constants::MATE_THRESHOLD;
use super::SearchContext;

impl SearchContext<'_> {
    /// Razoring, reverse futility and null move pruning, tried in that
    /// order. The caller has already excluded PV nodes, nodes in check and
    /// positions short of non-pawn material.
    pub(super) fn prune_before_moves(
        &mut self,
        depth: i32,
        alpha: i32,
        beta: i32,
        eval: i32,
        allow_null: bool,
    ) -> Option<i32> {
        if let Some(score) = self.try_razoring(depth, alpha, beta, eval) {
            return Some(score);
        }

        let params = &self.state.params;
        if depth <= params.rfp_max_depth
            && beta.abs() < MATE_THRESHOLD
            && eval - params.rfp_margin * depth >= beta
        {
            return Some(eval);
        }

        if allow_null {
            return self.try_null_move_pruning(depth, beta, eval);
        }
        None
    }

    /// Hopeless at shallow depth: let quiescence confirm the fail-low.
    fn try_razoring(&mut self, depth: i32, alpha: i32, beta: i32, eval: i32) -> Option<i32> {
        let params = &self.state.params;
        if depth > params.razor_max_depth || eval + params.razor_margin * depth >= alpha {
            return None;
        }
        let score = self.quiescence(alpha, beta, 0);
        (score <= alpha && !self.aborted).then_some(score)
    }

    /// Give the opponent a free move; if they still cannot reach beta the
    /// node is very likely a cutoff.
    fn try_null_move_pruning(&mut self, depth: i32, beta: i32, eval: i32) -> Option<i32> {
        let params = &self.state.params;
        if depth < params.null_min_depth || eval < beta {
            return None;
        }
        let r = params.null_base_reduction + depth / params.null_depth_divisor;

        self.stack.push_null();
        let score = -self.alphabeta(depth - 1 - r, -beta, -beta + 1, false);
        self.stack.pop();

        if self.aborted {
            return None;
        }
        if score >= beta {
            // Unproven mates from a pass are not trusted.
            return Some(if score >= MATE_THRESHOLD { beta } else { score });
        }
        None
    }
}
