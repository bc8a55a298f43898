//! Pseudo-legal move generation.
//!
//! Generators append to a caller-supplied [`MoveList`] and never check king
//! safety, with two exceptions: castling is only emitted when fully legal,
//! and evasions only contain moves that address the check (king steps off
//! the checking line, captures of the checker, interpositions). Everything
//! else goes through [`Position::is_legal`].

mod evasions;
mod kings;
mod pawns;
mod pieces;

use super::attack_tables::{bishop_attacks, piece_attacks, rook_attacks};
use super::make::castle_rook_squares;
use super::position::Position;
use super::types::{Bitboard, Move, MoveList, Piece};

/// Which promotion pieces a generator emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotions {
    /// Queen promotions only; used by quiescence to bound branching.
    QueenOnly,
    /// One move per promotion piece.
    All,
}

impl Position {
    /// Captures, en passant, and every promotion (capturing or not).
    pub fn generate_captures(&self, list: &mut MoveList, promotions: Promotions) {
        let us = self.side_to_move;
        let enemies = self.occupancy(us.opponent());
        let empty = !self.all_occupied;
        self.gen_pawn_tactical(list, enemies, empty, promotions);
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            self.gen_piece_moves(list, piece, enemies);
        }
        self.gen_king_moves(list, enemies);
    }

    /// Non-capturing, non-promoting moves, castling included.
    pub fn generate_quiets(&self, list: &mut MoveList) {
        let empty = !self.all_occupied;
        self.gen_pawn_quiets(list, empty);
        for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
            self.gen_piece_moves(list, piece, empty);
        }
        self.gen_king_moves(list, empty);
        self.gen_castling(list);
    }

    /// Quiet moves that give check, for the first quiescence ply.
    pub fn generate_checks(&self, list: &mut MoveList) {
        let mut quiets = MoveList::new();
        self.generate_quiets(&mut quiets);
        for &mv in &quiets {
            if self.gives_check(mv) {
                list.push(mv);
            }
        }
    }

    /// Pseudo-legal moves for the side to move: evasions when in check,
    /// otherwise captures with all promotions followed by quiet moves.
    pub fn generate_moves(&self, list: &mut MoveList) {
        if self.checkers().any() {
            self.generate_evasions(list);
        } else {
            self.generate_captures(list, Promotions::All);
            self.generate_quiets(list);
        }
    }

    /// All legal moves.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        self.generate_moves(&mut list);
        let pinned = self.pinned(self.side_to_move) & self.occupancy(self.side_to_move);
        list.retain(|mv| self.is_legal(mv, pinned));
        list
    }

    /// Does `mv` (pseudo-legal, not yet played) put the opponent in check?
    #[must_use]
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let enemy_king = self.king_square(them);
        let from = mv.from();
        let to = mv.to();

        let mut occ = (self.all_occupied & !Bitboard::from(from)) | Bitboard::from(to);
        if mv.is_en_passant() {
            occ &= !Bitboard::from(to.offset(-us.pawn_push()));
        }

        let landed = mv.promotion().unwrap_or(mv.piece());
        if piece_attacks(landed, us, to, occ).contains(enemy_king) {
            return true;
        }

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(from, to);
            let occ = (occ & !Bitboard::from(rook_from)) | Bitboard::from(rook_to);
            return rook_attacks(rook_to, occ).contains(enemy_king);
        }

        // Discovered attacks from sliders that stayed put.
        let moved = Bitboard::from(from);
        let diag = self.diagonal_sliders(us) & !moved;
        let straight = self.straight_sliders(us) & !moved;
        (bishop_attacks(enemy_king, occ) & diag).any()
            || (rook_attacks(enemy_king, occ) & straight).any()
    }

    #[inline]
    pub(crate) fn push_with_capture(&self, list: &mut MoveList, mv: Move) {
        match self.piece_at(mv.to()) {
            Some(victim) => list.push(mv.with_capture(victim.piece())),
            None => list.push(mv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fen: &str) -> usize {
        Position::from_fen(fen).unwrap().legal_moves().len()
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let pos = Position::new();
        assert_eq!(pos.legal_moves().len(), 20);
        let mut caps = MoveList::new();
        pos.generate_captures(&mut caps, Promotions::All);
        assert!(caps.is_empty());
    }

    #[test]
    fn test_quiescence_promotions_are_queen_only() {
        let pos = Position::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut queen_only = MoveList::new();
        pos.generate_captures(&mut queen_only, Promotions::QueenOnly);
        assert_eq!(queen_only.len(), 2, "a8=Q and axb8=Q");
        assert!(queen_only.iter().all(|m| m.promotion() == Some(Piece::Queen)));
        let mut all = MoveList::new();
        pos.generate_captures(&mut all, Promotions::All);
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn test_checks_generation() {
        // The own king blocks the e-file, so only the back-rank check remains.
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mut checks = MoveList::new();
        pos.generate_checks(&mut checks);
        let names: Vec<String> = checks.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["a1a8".to_string()]);
    }

    #[test]
    fn test_discovered_check_detected() {
        // Knight on e4 screens the rook on e1.
        let pos = Position::from_fen("4k3/8/8/8/4N3/8/8/4R1K1 w - - 0 1").unwrap();
        let mv = pos.parse_move("e4c5").unwrap();
        assert!(pos.gives_check(mv));
        let mut checks = MoveList::new();
        pos.generate_checks(&mut checks);
        // Every knight move uncovers the rook; d6 and f6 also check directly.
        assert_eq!(checks.iter().filter(|m| m.piece() == Piece::Knight).count(), 8);
    }

    #[test]
    fn test_castling_check() {
        let pos = Position::from_fen("5k2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mv = pos.parse_move("e1g1").unwrap();
        assert!(pos.gives_check(mv));
    }

    #[test]
    fn test_known_move_counts() {
        assert_eq!(
            count("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
            48
        );
        assert_eq!(count("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"), 14);
        assert_eq!(
            count("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1"),
            6
        );
    }

    #[test]
    fn test_stalemate_has_no_moves() {
        assert_eq!(count("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), 0);
    }
}
