//! Move application on position snapshots.
//!
//! There is no unmake: callers apply a move to a copy of the parent (see
//! [`PositionStack`](super::PositionStack)) and drop the copy to take it back.

use super::position::Position;
use super::types::{Color, ColoredPiece, Move, Piece, Square};
use crate::zobrist::side_key;

/// Rook origin and destination for a castling king move.
#[inline]
pub(crate) fn castle_rook_squares(king_from: Square, king_to: Square) -> (Square, Square) {
    if king_to.file() > king_from.file() {
        (king_from.offset(3), king_from.offset(1))
    } else {
        (king_from.offset(-4), king_from.offset(-1))
    }
}

impl Position {
    /// Apply a pseudo-legal move in place. Legality is the caller's concern.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(!mv.is_null(), "use apply_null_move for passes");
        let us = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();
        debug_assert_eq!(
            self.piece_at(from),
            Some(ColoredPiece::new(us, piece)),
            "move {mv:?} does not match the board"
        );

        self.set_en_passant(None);
        let mut irreversible = piece == Piece::Pawn;

        if mv.is_en_passant() {
            self.remove_piece(to.offset(-us.pawn_push()));
            irreversible = true;
        } else if mv.is_capture() {
            let victim = self.remove_piece(to);
            debug_assert_eq!(Some(victim.piece()), mv.captured());
            irreversible = true;
        }

        self.move_piece(from, to);

        if let Some(promo) = mv.promotion() {
            self.remove_piece(to);
            self.put_piece(to, ColoredPiece::new(us, promo));
        } else if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(from, to);
            self.move_piece(rook_from, rook_to);
        }

        let rights = self.castling.after_move(from.index(), to.index());
        if rights != self.castling {
            self.set_castling(rights);
            irreversible = true;
        }

        if mv.is_double_push() {
            self.set_en_passant(Some(from.offset(us.pawn_push())));
        }

        if piece == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        self.reversible_plies = if irreversible {
            0
        } else {
            self.reversible_plies.saturating_add(1)
        };
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = us.opponent();
        self.hash ^= side_key();
    }

    /// Pass the turn without moving a piece. Clears en passant and breaks the
    /// repetition window so no repetition is ever detected across a pass.
    pub fn apply_null_move(&mut self) {
        self.set_en_passant(None);
        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        self.reversible_plies = 0;
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= side_key();
    }

    /// Copy of this position with `mv` applied.
    #[must_use]
    pub fn after(&self, mv: Move) -> Position {
        let mut next = *self;
        next.apply_move(mv);
        next
    }
}
