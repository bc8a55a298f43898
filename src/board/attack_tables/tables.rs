//! Precomputed leaper attacks and square-geometry tables.

use once_cell::sync::Lazy;

use super::magic::{bishop_attacks_slow, rook_attacks_slow};
use crate::board::types::Bitboard;

fn leaper_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
            }
        }
        *slot = Bitboard(mask);
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    leaper_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` on `sq` attacks
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])]);

/// Squares aligned with a pair, excluding both ends. Indexed `[a * 64 + b]`.
pub(crate) struct PairTables {
    pub(crate) between: Vec<Bitboard>,
    pub(crate) line: Vec<Bitboard>,
    pub(crate) evasion: Vec<Bitboard>,
}

/// `between`: squares strictly between two aligned squares.
/// `line`: the full board line through two aligned squares.
/// `evasion`: for a king on `a` checked by a slider on `b`, the squares on the
/// checking line behind the king, which remain attacked once the king steps there.
pub(crate) static PAIR_TABLES: Lazy<PairTables> = Lazy::new(|| {
    let mut between = vec![Bitboard::EMPTY; 64 * 64];
    let mut line = vec![Bitboard::EMPTY; 64 * 64];
    let mut evasion = vec![Bitboard::EMPTY; 64 * 64];
    for a in 0..64usize {
        let a_bit = 1u64 << a;
        for b in 0..64usize {
            if a == b {
                continue;
            }
            let b_bit = 1u64 << b;
            let idx = a * 64 + b;
            let attacks: [fn(usize, u64) -> u64; 2] = [rook_attacks_slow, bishop_attacks_slow];
            for slow in attacks {
                if slow(a, 0) & b_bit == 0 {
                    continue;
                }
                between[idx] = Bitboard(slow(a, b_bit) & slow(b, a_bit));
                line[idx] = Bitboard((slow(a, 0) & slow(b, 0)) | a_bit | b_bit);
                // The ray from b through a, continued past a.
                evasion[idx] = Bitboard(slow(a, b_bit) & line[idx].0 & !between[idx].0 & !b_bit);
            }
        }
    }
    PairTables {
        between,
        line,
        evasion,
    }
});

/// Chebyshev (king-step) distance between two squares.
pub(crate) static DISTANCE: Lazy<[[u8; 64]; 64]> = Lazy::new(|| {
    let mut table = [[0u8; 64]; 64];
    for (a, row) in table.iter_mut().enumerate() {
        for (b, slot) in row.iter_mut().enumerate() {
            let dr = (a / 8).abs_diff(b / 8);
            let df = (a % 8).abs_diff(b % 8);
            *slot = dr.max(df) as u8;
        }
    }
    table
});

/// `FRONT_SPAN[color][sq]`: squares ahead of a pawn on its own file.
/// `PASSED_MASK[color][sq]`: front span plus the adjacent files ahead; a pawn is
/// passed when no enemy pawn stands on this mask.
pub(crate) struct PawnMasks {
    pub(crate) front_span: [[Bitboard; 64]; 2],
    pub(crate) passed: [[Bitboard; 64]; 2],
}

pub(crate) static PAWN_MASKS: Lazy<PawnMasks> = Lazy::new(|| {
    let mut front_span = [[Bitboard::EMPTY; 64]; 2];
    let mut passed = [[Bitboard::EMPTY; 64]; 2];
    for sq in 0..64usize {
        let rank = sq / 8;
        let file = sq % 8;
        let files = {
            let mut f = Bitboard::file_mask(file);
            if file > 0 {
                f |= Bitboard::file_mask(file - 1);
            }
            if file < 7 {
                f |= Bitboard::file_mask(file + 1);
            }
            f
        };
        let mut ahead_white = Bitboard::EMPTY;
        for r in rank + 1..8 {
            ahead_white |= Bitboard::rank_mask(r);
        }
        let mut ahead_black = Bitboard::EMPTY;
        for r in 0..rank {
            ahead_black |= Bitboard::rank_mask(r);
        }
        front_span[0][sq] = ahead_white & Bitboard::file_mask(file);
        front_span[1][sq] = ahead_black & Bitboard::file_mask(file);
        passed[0][sq] = ahead_white & files;
        passed[1][sq] = ahead_black & files;
    }
    PawnMasks { front_span, passed }
});
