use super::super::attack_tables::pawn_attacks;
use super::super::position::Position;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::Promotions;

impl Position {
    fn pawn_ranks(&self) -> (Bitboard, Bitboard) {
        // (rank a single push must land on to allow a double push, promotion rank)
        match self.side_to_move {
            Color::White => (Bitboard::RANK_3, Bitboard::RANK_8),
            Color::Black => (Bitboard::RANK_6, Bitboard::RANK_1),
        }
    }

    fn single_pushes(&self) -> Bitboard {
        let pawns = self.pieces(self.side_to_move, Piece::Pawn);
        let empty = !self.all_occupied;
        match self.side_to_move {
            Color::White => pawns.shift_north() & empty,
            Color::Black => pawns.shift_south() & empty,
        }
    }

    /// Captures landing on `capture_mask`, promotions by push onto
    /// `push_mask`, and en passant when either the vacated target square is
    /// in `push_mask` or the captured pawn is in `capture_mask`.
    pub(super) fn gen_pawn_tactical(
        &self,
        list: &mut MoveList,
        capture_mask: Bitboard,
        push_mask: Bitboard,
        promotions: Promotions,
    ) {
        let us = self.side_to_move;
        let them = us.opponent();
        let push = us.pawn_push();
        let (_, promo_rank) = self.pawn_ranks();
        let enemies = self.occupancy(them) & capture_mask;

        for to in self.single_pushes() & push_mask & promo_rank {
            push_promotions(list, Move::new(to.offset(-push), to, Piece::Pawn), promotions);
        }

        for from in self.pieces(us, Piece::Pawn) {
            for to in pawn_attacks(us, from) & enemies {
                let base = match self.piece_at(to) {
                    Some(victim) => Move::new(from, to, Piece::Pawn).with_capture(victim.piece()),
                    None => continue,
                };
                if promo_rank.contains(to) {
                    push_promotions(list, base, promotions);
                } else {
                    list.push(base);
                }
            }
        }

        if let Some(ep) = self.en_passant {
            let victim = ep.offset(-push);
            if push_mask.contains(ep) || capture_mask.contains(victim) {
                for from in pawn_attacks(them, ep) & self.pieces(us, Piece::Pawn) {
                    list.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    /// Non-promoting single and double pushes landing on `push_mask`.
    pub(super) fn gen_pawn_quiets(&self, list: &mut MoveList, push_mask: Bitboard) {
        let us = self.side_to_move;
        let push = us.pawn_push();
        let (double_rank, promo_rank) = self.pawn_ranks();
        let empty = !self.all_occupied;
        let singles = self.single_pushes();

        for to in singles & push_mask & !promo_rank {
            list.push(Move::new(to.offset(-push), to, Piece::Pawn));
        }

        let doubles = match us {
            Color::White => (singles & double_rank).shift_north(),
            Color::Black => (singles & double_rank).shift_south(),
        } & empty
            & push_mask;
        for to in doubles {
            list.push(Move::double_push(to.offset(-2 * push), to));
        }
    }
}

fn push_promotions(list: &mut MoveList, base: Move, promotions: Promotions) {
    match promotions {
        Promotions::QueenOnly => list.push(base.with_promotion(Piece::Queen)),
        Promotions::All => {
            for promo in PROMOTION_PIECES {
                list.push(base.with_promotion(promo));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_moves(fen: &str) -> Vec<String> {
        let pos = Position::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        pos.generate_moves(&mut list);
        let mut names: Vec<String> = list
            .iter()
            .filter(|m| m.piece() == Piece::Pawn)
            .map(|m| m.to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_double_push_blocked() {
        assert_eq!(pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1"), Vec::<String>::new());
        assert_eq!(pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1"), vec!["e2e3"]);
        assert_eq!(pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1"), vec!["e7e5", "e7e6"]);
    }

    #[test]
    fn test_en_passant_generated_and_flagged() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let mut list = MoveList::new();
        pos.generate_captures(&mut list, Promotions::All);
        assert_eq!(list.len(), 1);
        let mv = list[0];
        assert!(mv.is_en_passant());
        assert_eq!(mv.captured(), Some(Piece::Pawn));
        assert_eq!(mv.to(), Square::from_index(43));
    }

    #[test]
    fn test_black_promotions() {
        let moves = pawn_moves("4k3/8/8/8/8/8/p7/1R2K3 b - - 0 1");
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&"a2b1n".to_string()));
        assert!(moves.contains(&"a2a1q".to_string()));
    }
}
