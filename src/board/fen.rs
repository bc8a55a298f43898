use std::fmt::Write as _;
use std::str::FromStr;

use super::error::FenError;
use super::position::Position;
use super::types::{CastlingRights, Color, ColoredPiece, Piece, Square};

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The half-move and full-move counters are optional and default to 0 and 1.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut pos = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { rank: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let cp = ColoredPiece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    pos.put_piece(Square::from_index((7 - rank_idx) * 8 + file), cp);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
            if file < 8 {
                return Err(FenError::TooFewFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
        }

        for color in Color::BOTH {
            let kings = pos.pieces(color, Piece::King).popcount();
            if kings != 1 {
                return Err(FenError::KingCount { color, found: kings });
            }
        }

        match parts[1] {
            "w" => pos.set_side_to_move(Color::White),
            "b" => pos.set_side_to_move(Color::Black),
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        }

        let them = pos.side_to_move().opponent();
        if pos.in_check(them) {
            return Err(FenError::OpponentInCheck { color: them });
        }

        let mut rights = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => rights.set(Color::White, true),
                'Q' => rights.set(Color::White, false),
                'k' => rights.set(Color::Black, true),
                'q' => rights.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }
        pos.set_castling(rights);

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq: Square = parts[3].parse().map_err(|_| invalid())?;
            if sq.rank() != 2 && sq.rank() != 5 {
                return Err(invalid());
            }
            if !pos.en_passant_possible(sq) {
                return Err(FenError::ImpossibleEnPassant { square: sq });
            }
            pos.set_en_passant(Some(sq));
        }

        if let Some(text) = parts.get(4) {
            pos.halfmove_clock = text.parse().map_err(|_| FenError::InvalidClock {
                found: (*text).to_string(),
            })?;
        }
        if let Some(text) = parts.get(5) {
            pos.fullmove_number = text.parse().map_err(|_| FenError::InvalidClock {
                found: (*text).to_string(),
            })?;
        }

        Ok(pos)
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::from_index(rank * 8 + file)) {
                    Some(cp) => {
                        if empty > 0 {
                            let _ = write!(fen, "{empty}");
                            empty = 0;
                        }
                        fen.push(cp.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(fen, "{empty}");
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });
        fen.push(' ');

        let rights = self.castling;
        let before = fen.len();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if rights.has(color, kingside) {
                fen.push(c);
            }
        }
        if fen.len() == before {
            fen.push('-');
        }

        match self.en_passant {
            Some(sq) => {
                let _ = write!(fen, " {sq}");
            }
            None => fen.push_str(" -"),
        }
        let _ = write!(fen, " {} {}", self.halfmove_clock, self.fullmove_number);
        fen
    }
}

impl Position {
    /// `sq` is where a pawn of the side not to move skipped over on its double
    /// push: the pawn stands in front of it, and the skipped and start squares are empty.
    fn en_passant_possible(&self, sq: Square) -> bool {
        let us = self.side_to_move();
        let (target_rank, pawn_rank, start_rank) = match us {
            Color::White => (5, 4, 6),
            Color::Black => (2, 3, 1),
        };
        if sq.rank() != target_rank {
            return false;
        }
        let at = |rank| Square::new(rank, sq.file()).and_then(|s| self.piece_at(s));
        at(pawn_rank) == Some(ColoredPiece::new(us.opponent(), Piece::Pawn))
            && at(target_rank).is_none()
            && at(start_rank).is_none()
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_fen_matches_new() {
        let pos = Position::from_fen(START_FEN).unwrap();
        assert_eq!(pos, Position::new());
        assert_eq!(pos.to_fen(), START_FEN);
    }

    #[test]
    fn test_fen_round_trip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 17 42",
            "4k3/8/8/8/8/8/8/4K3 b - - 99 120",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
            assert!(pos.is_consistent());
        }
    }

    #[test]
    fn test_fen_black_to_move() {
        let pos: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse()
            .unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.en_passant(), Some("e3".parse().unwrap()));
    }

    #[test]
    fn test_fen_error_too_few_parts() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewParts { .. })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result = Position::from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { .. })));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { .. })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_fen_error_ranks_and_kings() {
        let result = Position::from_fen("8/8/8/8/8/8/K1k5 w - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidRank { rank: 7 })));
        let result = Position::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::KingCount {
                color: Color::Black,
                found: 0
            })
        ));
        let result = Position::from_fen("8/8/8/8/8/8/8/K1k6 w - - 0 1");
        assert!(matches!(result, Err(FenError::TooManyFiles { .. })));
    }

    #[test]
    fn test_fen_error_short_rank() {
        let result = Position::from_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1");
        assert_eq!(result, Err(FenError::TooFewFiles { rank: 7, files: 7 }));
        let result = Position::from_fen("4k3/8/8/8/7/8/8/4K3 w - - 0 1");
        assert_eq!(result, Err(FenError::TooFewFiles { rank: 4, files: 7 }));
    }

    #[test]
    fn test_fen_error_side_not_to_move_in_check() {
        let result = Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1");
        assert_eq!(result, Err(FenError::OpponentInCheck { color: Color::Black }));
        let result = Position::from_fen("4k3/8/8/8/8/8/3p4/4K3 b - - 0 1");
        assert_eq!(result, Err(FenError::OpponentInCheck { color: Color::White }));
        // The side to move may be in check.
        assert!(Position::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").is_ok());
    }

    #[test]
    fn test_fen_error_impossible_en_passant() {
        let impossible = |fen: &str, square: &str| {
            assert_eq!(
                Position::from_fen(fen),
                Err(FenError::ImpossibleEnPassant {
                    square: square.parse().unwrap()
                }),
                "{fen}"
            );
        };
        // No pawn in front of the square.
        impossible("4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1", "e3");
        impossible("4k3/8/8/8/4p3/8/8/4K3 b - d3 0 1", "d3");
        impossible("4k3/8/8/8/8/8/8/4K3 w - e6 0 1", "e6");
        // Rank belongs to the side to move.
        impossible("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1", "e3");
        impossible("4k3/8/8/4p3/8/8/8/4K3 b - e6 0 1", "e6");
        // Pawn of the wrong color.
        impossible("4k3/8/8/4P3/8/8/8/4K3 w - e6 0 1", "e6");
        // Skipped square occupied.
        impossible("4k3/8/4n3/4p3/8/8/8/4K3 w - e6 0 1", "e6");
        // Start square occupied.
        impossible("4k3/4n3/8/4p3/8/8/8/4K3 w - e6 0 1", "e6");
    }

    #[test]
    fn test_fen_rejected_en_passant_positions_never_reach_movegen() {
        for fen in ["4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1", "4k3/8/8/8/4p3/8/8/4K3 b - d3 0 1"] {
            assert!(Position::from_fen(fen).is_err());
            let cleared = fen.replace(" e3 ", " - ").replace(" d3 ", " - ");
            let pos = Position::from_fen(&cleared).unwrap();
            assert!(!pos.legal_moves().is_empty());
        }
    }

    #[test]
    fn test_fen_counters_optional() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        let err = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - - x 1");
        assert!(matches!(err, Err(FenError::InvalidClock { .. })));
    }

    #[test]
    fn test_fen_partial_castling() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let rights = pos.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }
}
