use super::super::attack_tables::{between, king_attacks};
use super::super::position::Position;
use super::super::types::{Bitboard, Move, MoveList, Piece, Square};

impl Position {
    /// King steps onto `targets`. Safety of the destination is left to the
    /// legality filter.
    pub(super) fn gen_king_moves(&self, list: &mut MoveList, targets: Bitboard) {
        let us = self.side_to_move;
        let from = self.king_square(us);
        for to in king_attacks(from) & targets & !self.occupancy(us) {
            self.push_with_capture(list, Move::new(from, to, Piece::King));
        }
    }

    /// Fully legal castling moves: the right is held, the rook is home, the
    /// squares between king and rook are empty, and the king neither starts
    /// on, passes through, nor lands on an attacked square.
    pub(super) fn gen_castling(&self, list: &mut MoveList) {
        let us = self.side_to_move;
        if !self.castling.any_for(us) {
            return;
        }
        let them = us.opponent();
        let back = us.back_rank();
        let king_from = square_on(back, 4);
        if self.king_square(us) != king_from || self.is_attacked(king_from, them) {
            return;
        }

        for kingside in [true, false] {
            if !self.castling.has(us, kingside) {
                continue;
            }
            let (rook_file, king_file, step) = if kingside { (7, 6, 1) } else { (0, 2, -1) };
            let rook_from = square_on(back, rook_file);
            if !self.pieces(us, Piece::Rook).contains(rook_from) {
                continue;
            }
            if (between(king_from, rook_from) & self.all_occupied).any() {
                continue;
            }
            let transit = king_from.offset(step);
            let king_to = square_on(back, king_file);
            if self.is_attacked(transit, them) || self.is_attacked(king_to, them) {
                continue;
            }
            list.push(Move::castle(king_from, king_to));
        }
    }
}

#[inline]
fn square_on(rank: usize, file: usize) -> Square {
    Square::from_index(rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(fen: &str) -> Vec<String> {
        let pos = Position::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        pos.gen_castling(&mut list);
        list.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_both_sides_available() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["e1g1", "e1c1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["e8g8", "e8c8"]);
    }

    #[test]
    fn test_attacked_transit_square_blocks_castling() {
        // Black rook on f8 covers f1.
        assert_eq!(castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec!["e1c1"]);
    }

    #[test]
    fn test_attacked_b_file_does_not_block_queenside() {
        // Only the king's path matters, b1 may be attacked.
        assert_eq!(castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1"), vec!["e1c1"]);
    }

    #[test]
    fn test_no_castling_out_of_check_or_through_pieces() {
        assert!(castles("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").is_empty());
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn test_rights_without_rook_are_ignored() {
        assert!(castles("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1").is_empty());
    }
}
