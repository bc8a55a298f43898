//! Position snapshot: piece placement plus incrementally maintained hash,
//! material and positional tally.

use super::attack_tables::{
    bishop_attacks, between, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use super::pst::tally_term;
use super::types::{Bitboard, CastlingRights, Color, ColoredPiece, Piece, Square};
use crate::zobrist::{castling_key, en_passant_key, piece_key, side_key};

/// A complete, self-contained board state.
///
/// Positions are plain values: the search copies the parent into the next
/// slot of a [`PositionStack`](super::PositionStack) and applies a move to
/// the copy, so undo never has to reverse anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) mailbox: [Option<ColoredPiece>; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    /// Plies since the last capture, pawn move, castling-rights change or null move.
    pub(crate) reversible_plies: u16,
    pub(crate) hash: u64,
    pub(crate) pawn_hash: u64,
    /// Material balance, White minus Black.
    pub(crate) material: i32,
    pub(crate) non_pawn_material: [i32; 2],
    /// Piece-square tally, White minus Black.
    pub(crate) tally: i32,
}

/// Derived fields recomputed from placement alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedState {
    pub hash: u64,
    pub pawn_hash: u64,
    pub material: i32,
    pub non_pawn_material: [i32; 2],
    pub tally: i32,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            pos.put_piece(Square::from_index(file), ColoredPiece::new(Color::White, *piece));
            pos.put_piece(Square::from_index(56 + file), ColoredPiece::new(Color::Black, *piece));
            pos.put_piece(Square::from_index(8 + file), ColoredPiece::new(Color::White, Piece::Pawn));
            pos.put_piece(Square::from_index(48 + file), ColoredPiece::new(Color::Black, Piece::Pawn));
        }
        pos.set_castling(CastlingRights::all());
        pos
    }

    pub(crate) fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            mailbox: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            reversible_plies: 0,
            hash: 0,
            pawn_hash: 0,
            material: 0,
            non_pawn_material: [0; 2],
            tally: 0,
        }
    }

    // ------------------------------------------------------------------
    // Incremental primitives. Every placement change goes through these so
    // the derived fields never drift from the board.
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) fn put_piece(&mut self, sq: Square, cp: ColoredPiece) {
        debug_assert!(self.mailbox[sq.index()].is_none(), "square {sq} occupied");
        let bb = Bitboard::from_square(sq);
        let (color, piece) = (cp.color(), cp.piece());
        self.pieces[color.index()][piece.index()] |= bb;
        self.occupied[color.index()] |= bb;
        self.all_occupied |= bb;
        self.mailbox[sq.index()] = Some(cp);

        let key = piece_key(cp, sq);
        self.hash ^= key;
        if piece == Piece::Pawn {
            self.pawn_hash ^= key;
        } else {
            self.non_pawn_material[color.index()] += piece.value();
        }
        self.material += color.sign() * piece.value();
        self.tally += tally_term(cp, sq);
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, sq: Square) -> ColoredPiece {
        let Some(cp) = self.mailbox[sq.index()].take() else {
            panic!("no piece on {sq} to remove");
        };
        let bb = Bitboard::from_square(sq);
        let (color, piece) = (cp.color(), cp.piece());
        self.pieces[color.index()][piece.index()] ^= bb;
        self.occupied[color.index()] ^= bb;
        self.all_occupied ^= bb;

        let key = piece_key(cp, sq);
        self.hash ^= key;
        if piece == Piece::Pawn {
            self.pawn_hash ^= key;
        } else {
            self.non_pawn_material[color.index()] -= piece.value();
        }
        self.material -= color.sign() * piece.value();
        self.tally -= tally_term(cp, sq);
        cp
    }

    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let cp = self.remove_piece(from);
        self.put_piece(to, cp);
    }

    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.hash ^= castling_key(self.castling) ^ castling_key(rights);
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, target: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= en_passant_key(old);
        }
        if let Some(new) = target {
            self.hash ^= en_passant_key(new);
        }
        self.en_passant = target;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.hash ^= side_key();
            self.side_to_move = color;
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn pawn_hash(&self) -> u64 {
        self.pawn_hash
    }

    /// Material balance in centipawns, White minus Black.
    #[inline]
    #[must_use]
    pub fn material(&self) -> i32 {
        self.material
    }

    /// Piece-square tally, White minus Black.
    #[inline]
    #[must_use]
    pub fn tally(&self) -> i32 {
        self.tally
    }

    #[inline]
    #[must_use]
    pub fn non_pawn_material(&self, color: Color) -> i32 {
        self.non_pawn_material[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<ColoredPiece> {
        self.mailbox[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces(color, Piece::King).lsb()
    }

    #[inline]
    pub(crate) fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, Piece::Bishop) | self.pieces(color, Piece::Queen)
    }

    #[inline]
    pub(crate) fn straight_sliders(&self, color: Color) -> Bitboard {
        self.pieces(color, Piece::Rook) | self.pieces(color, Piece::Queen)
    }

    // ------------------------------------------------------------------
    // Attack queries
    // ------------------------------------------------------------------

    /// Pieces of both colors attacking `sq` given occupancy `occ`.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, occ: Bitboard) -> Bitboard {
        (pawn_attacks(Color::White, sq) & self.pieces(Color::Black, Piece::Pawn))
            | (pawn_attacks(Color::Black, sq) & self.pieces(Color::White, Piece::Pawn))
            | (knight_attacks(sq)
                & (self.pieces(Color::White, Piece::Knight) | self.pieces(Color::Black, Piece::Knight)))
            | (king_attacks(sq)
                & (self.pieces(Color::White, Piece::King) | self.pieces(Color::Black, Piece::King)))
            | (bishop_attacks(sq, occ)
                & (self.diagonal_sliders(Color::White) | self.diagonal_sliders(Color::Black)))
            | (rook_attacks(sq, occ)
                & (self.straight_sliders(Color::White) | self.straight_sliders(Color::Black)))
    }

    /// True if any piece of `by` attacks `sq` with occupancy `occ`.
    #[must_use]
    pub fn is_attacked_with(&self, sq: Square, by: Color, occ: Bitboard) -> bool {
        (pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn)).any()
            || (knight_attacks(sq) & self.pieces(by, Piece::Knight)).any()
            || (king_attacks(sq) & self.pieces(by, Piece::King)).any()
            || (bishop_attacks(sq, occ) & self.diagonal_sliders(by)).any()
            || (rook_attacks(sq, occ) & self.straight_sliders(by)).any()
    }

    #[inline]
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.is_attacked_with(sq, by, self.all_occupied)
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color.opponent())
    }

    /// Enemy pieces giving check to the side to move.
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_to(self.king_square(us), self.all_occupied) & self.occupancy(us.opponent())
    }

    /// Pieces standing alone between `color`'s king and an enemy slider aimed at it.
    ///
    /// The blocker may belong to either side; callers that need only their own
    /// pinned pieces intersect with their occupancy.
    #[must_use]
    pub fn pinned(&self, color: Color) -> Bitboard {
        let king = self.king_square(color);
        let them = color.opponent();
        let snipers = (bishop_attacks(king, Bitboard::EMPTY) & self.diagonal_sliders(them))
            | (rook_attacks(king, Bitboard::EMPTY) & self.straight_sliders(them));
        let mut pinned = Bitboard::EMPTY;
        for sniper in snipers {
            let blockers = between(king, sniper) & self.all_occupied;
            if blockers.any() && !blockers.more_than_one() {
                pinned |= blockers;
            }
        }
        pinned
    }

    // ------------------------------------------------------------------
    // Draw rules
    // ------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor, or only
    /// bishops all on one square color.
    #[must_use]
    pub fn insufficient_material(&self) -> bool {
        let heavy_or_pawns = Color::BOTH.iter().any(|&c| {
            (self.pieces(c, Piece::Pawn) | self.pieces(c, Piece::Rook) | self.pieces(c, Piece::Queen)).any()
        });
        if heavy_or_pawns {
            return false;
        }
        let knights = self.pieces(Color::White, Piece::Knight) | self.pieces(Color::Black, Piece::Knight);
        let bishops = self.pieces(Color::White, Piece::Bishop) | self.pieces(Color::Black, Piece::Bishop);
        let minors = knights.popcount() + bishops.popcount();
        if minors <= 1 {
            return true;
        }
        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & Bitboard::DARK_SQUARES).is_empty())
    }

    // ------------------------------------------------------------------
    // Verification
    // ------------------------------------------------------------------

    /// Recompute every derived field from the piece placement.
    #[must_use]
    pub fn recompute(&self) -> DerivedState {
        let mut derived = DerivedState {
            hash: castling_key(self.castling),
            pawn_hash: 0,
            material: 0,
            non_pawn_material: [0; 2],
            tally: 0,
        };
        if self.side_to_move == Color::Black {
            derived.hash ^= side_key();
        }
        if let Some(ep) = self.en_passant {
            derived.hash ^= en_passant_key(ep);
        }
        for sq in Square::all() {
            let Some(cp) = self.mailbox[sq.index()] else {
                continue;
            };
            let key = piece_key(cp, sq);
            derived.hash ^= key;
            if cp.piece() == Piece::Pawn {
                derived.pawn_hash ^= key;
            } else {
                derived.non_pawn_material[cp.color().index()] += cp.piece().value();
            }
            derived.material += cp.color().sign() * cp.piece().value();
            derived.tally += tally_term(cp, sq);
        }
        derived
    }

    /// The incrementally maintained fields, for comparison with [`Position::recompute`].
    #[must_use]
    pub fn derived(&self) -> DerivedState {
        DerivedState {
            hash: self.hash,
            pawn_hash: self.pawn_hash,
            material: self.material,
            non_pawn_material: self.non_pawn_material,
            tally: self.tally,
        }
    }

    /// True when the mailbox, bitboards and derived fields all agree.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut occupied = [Bitboard::EMPTY; 2];
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece) {
                    if self.mailbox[sq.index()] != Some(ColoredPiece::new(color, piece)) {
                        return false;
                    }
                }
                occupied[color.index()] |= self.pieces(color, piece);
            }
        }
        let mailbox_count = self.mailbox.iter().filter(|p| p.is_some()).count() as u32;
        occupied == self.occupied
            && (occupied[0] | occupied[1]) == self.all_occupied
            && mailbox_count == self.all_occupied.popcount()
            && self.recompute() == self.derived()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}
