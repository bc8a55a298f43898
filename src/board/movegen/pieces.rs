use super::super::attack_tables::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use super::super::position::Position;
use super::super::types::{Bitboard, Move, MoveList, Piece};

impl Position {
    /// Knight, bishop, rook or queen moves landing on `targets`.
    pub(super) fn gen_piece_moves(&self, list: &mut MoveList, piece: Piece, targets: Bitboard) {
        let us = self.side_to_move;
        let occ = self.all_occupied;
        let targets = targets & !self.occupancy(us);
        for from in self.pieces(us, piece) {
            let attacks = match piece {
                Piece::Knight => knight_attacks(from),
                Piece::Bishop => bishop_attacks(from, occ),
                Piece::Rook => rook_attacks(from, occ),
                Piece::Queen => queen_attacks(from, occ),
                Piece::Pawn | Piece::King => unreachable!("pawns and kings have dedicated generators"),
            };
            for to in attacks & targets {
                self.push_with_capture(list, Move::new(from, to, piece));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_stops_at_blockers() {
        let pos = Position::from_fen("4k3/8/8/1p6/8/8/8/R3K2B w - - 0 1").unwrap();
        let mut list = MoveList::new();
        pos.gen_piece_moves(&mut list, Piece::Rook, !Bitboard::EMPTY);
        // a2..a8 and b1..d1
        assert_eq!(list.len(), 10);
        let mut list = MoveList::new();
        pos.gen_piece_moves(&mut list, Piece::Bishop, pos.occupancy(pos.side_to_move().opponent()));
        assert!(list.is_empty(), "h1 diagonal does not reach b5");
    }

    #[test]
    fn test_knight_capture_is_flagged() {
        let pos = Position::from_fen("4k3/8/8/8/8/2r5/8/1N2K3 w - - 0 1").unwrap();
        let mut list = MoveList::new();
        pos.gen_piece_moves(&mut list, Piece::Knight, pos.occupancy(pos.side_to_move().opponent()));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].captured(), Some(Piece::Rook));
    }
}
