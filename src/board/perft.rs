use super::position::Position;
use super::types::Move;

impl Position {
    /// Count leaf nodes of the legal move tree to `depth`.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves.iter().map(|&mv| self.after(mv).perft(depth - 1)).sum()
    }

    /// Per-root-move perft counts, for diffing against another generator.
    #[must_use]
    pub fn perft_divide(&self, depth: usize) -> Vec<(Move, u64)> {
        self.legal_moves()
            .iter()
            .map(|&mv| (mv, self.after(mv).perft(depth.saturating_sub(1))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::new();
        let divide = pos.perft_divide(3);
        assert_eq!(divide.len(), 20);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), pos.perft(3));
    }
}
