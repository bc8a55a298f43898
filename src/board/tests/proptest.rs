//! Property-based tests using proptest.

use crate::board::search::{HistoryTable, KillerTable};
use crate::board::{Color, Move, Piece, Position, PositionStack};
use crate::tt::{BoundType, TranspositionTable};
use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `plies` random legal moves from the initial position.
fn random_game(seed: u64, plies: usize) -> PositionStack {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stack = PositionStack::new(Position::new());
    for _ in 0..plies {
        let moves = stack.current().legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        stack.push_move(mv);
    }
    stack
}

proptest! {
    /// Property: popping every pushed move restores the root exactly
    #[test]
    fn prop_push_pop_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut stack = random_game(seed, num_moves);
        while stack.ply() > 0 {
            stack.pop();
        }
        prop_assert_eq!(*stack.current(), Position::new());
    }

    /// Property: incremental hash, material and tally match recomputation
    #[test]
    fn prop_incremental_state_consistent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let stack = random_game(seed, num_moves);
        let pos = stack.current();
        prop_assert_eq!(pos.derived(), pos.recompute());
        prop_assert!(pos.is_consistent());
    }

    /// Property: FEN round-trip preserves position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let stack = random_game(seed, num_moves);
        let pos = *stack.current();
        let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
        prop_assert_eq!(reparsed.to_fen(), pos.to_fen());
        prop_assert_eq!(reparsed.hash(), pos.hash());
        prop_assert_eq!(reparsed.derived(), pos.derived());
    }

    /// Property: legal moves never leave the mover in check
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in 0..30usize) {
        let stack = random_game(seed, num_moves);
        let pos = stack.current();
        let us = pos.side_to_move();
        for &mv in &pos.legal_moves() {
            prop_assert!(!pos.after(mv).in_check(us), "{} leaves king in check", mv);
            prop_assert!(pos.is_pseudo_legal(mv));
        }
    }

    /// Property: SEE of a capture never exceeds what it takes
    #[test]
    fn prop_see_bounded_by_victim(seed in seed_strategy(), num_moves in 0..30usize) {
        let stack = random_game(seed, num_moves);
        let pos = stack.current();
        for &mv in &pos.legal_moves() {
            let Some(victim) = mv.captured() else { continue };
            if mv.is_promotion() {
                continue;
            }
            let see = pos.see(mv);
            prop_assert!(see <= victim.value(), "{} see {} > {}", mv, see, victim.value());
            if mv.piece() != Piece::King {
                prop_assert!(see >= victim.value() - mv.piece().value());
            }
            prop_assert_eq!(pos.see_ge(mv, see), true);
            prop_assert_eq!(pos.see_ge(mv, see + 1), false);
        }
    }

    /// Property: killer moves are preserved after update
    #[test]
    fn prop_killer_preserves_moves(ply in 0..64usize, a in 0..64u8, b in 0..64u8) {
        prop_assume!(a != b);
        let first = Move::new(crate::board::Square::from_index(a as usize), crate::board::Square::from_index(b as usize), Piece::Knight);
        let second = Move::new(crate::board::Square::from_index(b as usize), crate::board::Square::from_index(a as usize), Piece::Knight);

        let mut killers = KillerTable::new();
        killers.update(ply, first);
        killers.update(ply, second);
        killers.update(ply, second);
        prop_assert_eq!(killers.primary(ply), second);
        prop_assert_eq!(killers.secondary(ply), first);
        prop_assert!(killers.contains(ply, first));
        prop_assert!(!killers.contains(ply + 1, first));
    }

    /// Property: history scores stay within the configured bound
    #[test]
    fn prop_history_bounded(
        updates in proptest::collection::vec((0..64u8, 1..20i32, any::<bool>()), 1..200),
    ) {
        let max = 16_384;
        let mut history = HistoryTable::new();
        let from = crate::board::Square::from_index(1);
        for (to, depth, reward) in updates {
            let mv = Move::new(from, crate::board::Square::from_index(to as usize), Piece::Knight);
            if reward {
                history.update(Color::White, mv, depth, max);
            } else {
                history.penalize(Color::White, mv, depth, max);
            }
            let score = history.score(Color::White, mv);
            prop_assert!((-max..=max).contains(&score));
            prop_assert_eq!(history.score(Color::Black, mv), 0);
        }
    }

    /// Property: history decay shrinks every score toward zero
    #[test]
    fn prop_history_decay_reduces(depth in 1..100i32, to in 0..64usize) {
        let mut history = HistoryTable::new();
        let mv = Move::new(crate::board::Square::from_index(0), crate::board::Square::from_index(to), Piece::Rook);
        history.update(Color::Black, mv, depth, 16_384);
        let before = history.score(Color::Black, mv);
        history.decay();
        let after = history.score(Color::Black, mv);
        prop_assert!(after.abs() <= before.abs());
        prop_assert_eq!(after, before / 4);
    }

    /// Property: TT stores and retrieves correct data
    #[test]
    fn prop_tt_store_retrieve(
        hash in any::<u64>(),
        depth in 0..100u32,
        score in -32_000..32_000i32,
        bound in prop_oneof![Just(BoundType::Exact), Just(BoundType::LowerBound), Just(BoundType::UpperBound)],
    ) {
        let mut tt = TranspositionTable::new(1);
        let mv = Position::new().legal_moves()[0];
        tt.store(hash, depth, score, bound, Some(mv));

        let entry = tt.probe(hash).expect("entry just stored");
        prop_assert_eq!(entry.depth(), depth);
        prop_assert_eq!(entry.score(), score);
        prop_assert_eq!(entry.bound_type(), bound);
        prop_assert_eq!(entry.best_move(), Some(mv));
        prop_assert!(tt.probe(hash ^ 0xFFFF_FFFF_0000_0000).is_none());
    }
}
