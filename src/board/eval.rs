//! Static evaluation.
//!
//! The search only ever talks to an [`Evaluator`]; the default one reads the
//! incrementally maintained material balance and piece-square tally, so a
//! leaf costs two loads and a sign flip.

use super::position::Position;

/// Leaf heuristic consumed by the search.
///
/// Implementations must be pure and deterministic: the same position always
/// scores the same, from the point of view of the side to move.
pub trait Evaluator: Send {
    fn evaluate(&self, pos: &Position) -> i32;
}

/// Material plus piece-square tally.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    #[inline]
    fn evaluate(&self, pos: &Position) -> i32 {
        pos.side_to_move().sign() * (pos.material() + pos.tally())
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32 + Send,
{
    fn evaluate(&self, pos: &Position) -> i32 {
        self(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_level() {
        assert_eq!(MaterialEvaluator.evaluate(&Position::new()), 0);
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        let w = MaterialEvaluator.evaluate(&white);
        assert!(w > 800);
        assert_eq!(MaterialEvaluator.evaluate(&black), -w);
    }

    #[test]
    fn mirrored_positions_score_the_same() {
        let a = Position::from_fen("4k3/8/8/8/8/2N5/8/4K3 w - - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/2n5/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&a), MaterialEvaluator.evaluate(&b));
    }

    #[test]
    fn closures_are_evaluators() {
        let constant = |_: &Position| 42;
        assert_eq!(constant.evaluate(&Position::new()), 42);
    }
}
