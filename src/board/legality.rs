//! Legality filter for pseudo-legal moves.

use super::attack_tables::line;
use super::position::Position;
use super::types::{Bitboard, ColoredPiece, Move, MoveList, Piece};

impl Position {
    /// Is a pseudo-legal `mv` legal? `pinned` must be
    /// `self.pinned(us) & self.occupancy(us)` for the side to move.
    ///
    /// King moves are tested against attacks with the king lifted off the
    /// board; pinned pieces must stay on the line through their king. En
    /// passant and non-king moves while in check are verified by trial.
    #[must_use]
    pub fn is_legal(&self, mv: Move, pinned: Bitboard) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let from = mv.from();
        let to = mv.to();

        if mv.piece() == Piece::King {
            if mv.is_castling() {
                return true;
            }
            let occ = self.all_occupied & !Bitboard::from(from);
            return !self.is_attacked_with(to, them, occ);
        }

        if mv.is_en_passant() || self.checkers().any() {
            return !self.after(mv).in_check(us);
        }

        !pinned.contains(from) || line(from, self.king_square(us)).contains(to)
    }

    /// Could `mv` have been produced by the generators in this position?
    ///
    /// Used to vet moves that come from outside the current node (hash
    /// table, killers) before they are searched.
    #[must_use]
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        if mv.is_null() {
            return false;
        }
        let us = self.side_to_move;
        if self.piece_at(mv.from()) != Some(ColoredPiece::new(us, mv.piece())) {
            return false;
        }
        let target = self.piece_at(mv.to());
        if !mv.is_en_passant() && target.map(ColoredPiece::piece) != mv.captured() {
            return false;
        }
        if target.is_some_and(|cp| cp.color() == us || cp.piece() == Piece::King) {
            return false;
        }
        let mut list = MoveList::new();
        self.generate_moves(&mut list);
        list.contains(mv)
    }
}
