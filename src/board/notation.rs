//! Coordinate move notation (`e2e4`, `e7e8q`).

use super::error::MoveParseError;
use super::position::Position;
use super::types::{Move, Piece, Square};

impl Position {
    /// Parse a move in coordinate notation and match it against the legal moves.
    ///
    /// Malformed text and well-formed but illegal moves produce different
    /// errors. The position is never modified.
    ///
    /// # Example
    /// ```
    /// use chess_search::board::Position;
    ///
    /// let pos = Position::new();
    /// let mv = pos.parse_move("g1f3").unwrap();
    /// assert_eq!(mv.to_string(), "g1f3");
    /// assert!(pos.parse_move("e2e5").is_err());
    /// ```
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(MoveParseError::InvalidLength {
                len: text.chars().count(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text.as_bytes().get(4) {
            None => None,
            Some(&b) => {
                let c = b as char;
                match Piece::from_char(c) {
                    Some(piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen))
                        if c.is_ascii_lowercase() =>
                    {
                        Some(piece)
                    }
                    _ => return Err(MoveParseError::InvalidPromotion { char: c }),
                }
            }
        };

        self.legal_moves()
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }
}
