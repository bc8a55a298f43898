//! Move ordering utilities for search.

use super::constants::{
    BAD_CAPTURE_SCORE, GOOD_CAPTURE_SCORE, KILLER1_SCORE, KILLER2_SCORE, TT_MOVE_SCORE,
};
use super::{HistoryTable, KillerTable};
use crate::board::{Move, MoveList, Piece, Position, ScoredMoveList};

/// Get material value for a piece (in centipawns)
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 20000,
    }
}

/// Most valuable victim, least valuable attacker. Promotions count the
/// promoted piece as part of the victim.
pub fn mvv_lva(mv: Move) -> i32 {
    let victim = mv.captured().map_or(0, piece_value)
        + mv.promotion().map_or(0, |p| piece_value(p) - piece_value(Piece::Pawn));
    let attacker = if mv.piece() == Piece::King {
        1000
    } else {
        piece_value(mv.piece())
    };
    victim * 10 - attacker / 10
}

/// Ordering inputs for one node.
pub(crate) struct OrderingHints<'a> {
    pub tt_move: Option<Move>,
    pub killers: &'a KillerTable,
    pub history: &'a HistoryTable,
    pub ply: usize,
}

/// Score `moves` into `out`, highest score first.
///
/// Hash move first, then captures and promotions that hold up under the
/// exchange evaluator, then the two killers, then quiets by history, then
/// losing captures.
pub(crate) fn order_moves(
    pos: &Position,
    moves: &MoveList,
    hints: &OrderingHints<'_>,
    out: &mut ScoredMoveList,
) {
    out.clear();
    let side = pos.side_to_move();
    let killer1 = hints.killers.primary(hints.ply);
    let killer2 = hints.killers.secondary(hints.ply);

    for &mv in moves {
        let score = if Some(mv) == hints.tt_move {
            TT_MOVE_SCORE
        } else if !mv.is_quiet() {
            if pos.see_ge(mv, 0) {
                GOOD_CAPTURE_SCORE + mvv_lva(mv)
            } else {
                BAD_CAPTURE_SCORE + mvv_lva(mv)
            }
        } else if mv == killer1 {
            KILLER1_SCORE
        } else if mv == killer2 {
            KILLER2_SCORE
        } else {
            hints.history.score(side, mv)
        };
        out.push(mv, score);
    }
    out.sort_by_score_desc();
}

/// Captures only: MVV-LVA, no exchange evaluation (quiescence prunes with
/// SEE separately).
pub(crate) fn order_captures(moves: &MoveList, out: &mut ScoredMoveList) {
    out.clear();
    for &mv in moves {
        out.push(mv, mvv_lva(mv));
    }
    out.sort_by_score_desc();
}
