use super::super::attack_tables::{between, evasion_mask};
use super::super::position::Position;
use super::super::types::{Bitboard, MoveList, Piece};
use super::Promotions;

impl Position {
    /// Moves for a side in check.
    ///
    /// King steps never stay on a checking slider's line (including the square
    /// behind the king). With a single checker, other pieces may capture it or
    /// interpose; against a double check only the king moves.
    pub fn generate_evasions(&self, list: &mut MoveList) {
        let us = self.side_to_move;
        let king = self.king_square(us);
        let checkers = self.checkers();
        debug_assert!(checkers.any(), "evasions requested when not in check");

        let mut king_targets = !Bitboard::EMPTY;
        for checker in checkers {
            if self.piece_at(checker).is_some_and(|cp| cp.piece().is_slider()) {
                king_targets &= !evasion_mask(king, checker);
            }
        }
        self.gen_king_moves(list, king_targets);

        if checkers.more_than_one() {
            return;
        }
        let checker = checkers.lsb();
        let block = between(king, checker);

        self.gen_pawn_tactical(list, checkers, block, Promotions::All);
        self.gen_pawn_quiets(list, block);
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            self.gen_piece_moves(list, piece, checkers | block);
        }
    }
}
