//! Static Exchange Evaluation (SEE).
//!
//! Resolves the capture sequence on one square to decide whether a capture
//! wins, loses or breaks even, without searching.

use super::attack_tables::{bishop_attacks, rook_attacks};
use super::position::Position;
use super::types::{Bitboard, Color, Move, Piece};

/// Exchange values; the king is priced so that it only ever captures last.
const SEE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20000];

const MAX_EXCHANGES: usize = 32;

impl Position {
    /// Material balance, for the side making `mv`, once all exchanges on
    /// the destination square are played out.
    ///
    /// Quiet moves score the loss of the moving piece if the square is
    /// defended, which lets the same routine vet quiet checks.
    #[must_use]
    pub fn see(&self, mv: Move) -> i32 {
        let to = mv.to();
        let victim_value = mv.captured().map_or(0, |p| SEE_VALUES[p.index()]);
        let promo_gain = mv
            .promotion()
            .map_or(0, |p| SEE_VALUES[p.index()] - SEE_VALUES[Piece::Pawn.index()]);

        let mut gain = [0i32; MAX_EXCHANGES];
        let mut depth = 0;
        gain[0] = victim_value + promo_gain;

        let mut occupancy = self.all_occupied ^ Bitboard::from(mv.from());
        if mv.is_en_passant() {
            occupancy ^= Bitboard::from(to.offset(-self.side_to_move.pawn_push()));
        }
        let mut attackers = self.attackers_to(to, occupancy) & occupancy;
        let diag = self.diagonal_sliders(Color::White) | self.diagonal_sliders(Color::Black);
        let straight = self.straight_sliders(Color::White) | self.straight_sliders(Color::Black);

        let mut on_square = mv.promotion().unwrap_or(mv.piece());
        let mut side = self.side_to_move.opponent();

        loop {
            let ours = attackers & self.occupancy(side);
            if ours.is_empty() {
                break;
            }
            let Some((piece, from)) = self.least_valuable(ours, side) else {
                break;
            };

            depth += 1;
            if depth >= MAX_EXCHANGES {
                break;
            }
            gain[depth] = SEE_VALUES[on_square.index()] - gain[depth - 1];
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }

            if piece == Piece::King && (attackers & self.occupancy(side.opponent()) & !from).any() {
                // The king cannot recapture into a defended square.
                depth -= 1;
                break;
            }

            occupancy ^= from;
            attackers &= !from;
            if matches!(piece, Piece::Pawn | Piece::Bishop | Piece::Queen) {
                attackers |= bishop_attacks(to, occupancy) & diag & occupancy;
            }
            if matches!(piece, Piece::Rook | Piece::Queen) {
                attackers |= rook_attacks(to, occupancy) & straight & occupancy;
            }

            on_square = piece;
            side = side.opponent();
        }

        while depth > 0 {
            depth -= 1;
            gain[depth] = -(-gain[depth]).max(gain[depth + 1]);
        }
        gain[0]
    }

    /// `see(mv) >= threshold`.
    #[inline]
    #[must_use]
    pub fn see_ge(&self, mv: Move, threshold: i32) -> bool {
        self.see(mv) >= threshold
    }

    fn least_valuable(&self, attackers: Bitboard, side: Color) -> Option<(Piece, Bitboard)> {
        Piece::ALL.into_iter().find_map(|piece| {
            let set = attackers & self.pieces(side, piece);
            set.any().then(|| (piece, Bitboard::from(set.lsb())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn see_of(fen: &str, mv: &str) -> i32 {
        let pos = Position::from_fen(fen).unwrap();
        let mv = pos.parse_move(mv).unwrap();
        pos.see(mv)
    }

    #[test]
    fn test_see_undefended_pawn() {
        assert_eq!(see_of("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", "e4d5"), 100);
    }

    #[test]
    fn test_see_pawn_trade() {
        assert_eq!(see_of("4k3/8/2p5/3p4/4P3/8/8/4K3 w - - 0 1", "e4d5"), 0);
    }

    #[test]
    fn test_see_knight_takes_defended_pawn() {
        assert_eq!(see_of("4k3/8/2p5/3p4/8/4N3/8/4K3 w - - 0 1", "e3d5"), 100 - 320);
    }

    #[test]
    fn test_see_queen_takes_defended_pawn() {
        assert_eq!(see_of("7k/8/2p5/3p4/4Q3/8/8/4K3 w - - 0 1", "e4d5"), 100 - 900);
    }

    #[test]
    fn test_see_xray_recapture() {
        // Rxd7 Rxd7 Rxd7: the rook on d1 backs up the one on d2.
        assert_eq!(see_of("3r2k1/3r4/8/8/8/8/3R4/3RK3 w - - 0 1", "d2d7"), 500);
        assert_eq!(see_of("3rr1k1/8/8/8/8/8/8/3R3K w - - 0 1", "d1d8"), 0);
    }

    #[test]
    fn test_see_quiet_move_into_pawn_attack() {
        assert_eq!(see_of("4k3/8/4p3/8/4N3/8/8/4K3 w - - 0 1", "e4d5"), -320);
        assert_eq!(see_of("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1", "e4d6"), 0);
    }

    #[test]
    fn test_see_king_does_not_recapture_defended() {
        // f7 is defended only by the king; the bishop on b3 keeps it from recapturing.
        assert_eq!(see_of("6k1/5p2/8/8/8/5Q2/8/4K3 w - - 0 1", "f3f7"), 100 - 900);
        assert_eq!(see_of("6k1/5p2/8/8/8/1B3Q2/8/4K3 w - - 0 1", "f3f7"), 100);
    }
}
