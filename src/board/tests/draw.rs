//! Draw detection tests.

use crate::board::{Position, PositionStack};

fn play_all(stack: &mut PositionStack, moves: &[&str]) {
    for text in moves {
        let mv = stack.current().parse_move(text).expect("legal move");
        stack.play(mv);
    }
}

#[test]
fn test_fen_halfmove_parsing() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - - 57 1").unwrap();
    assert_eq!(pos.halfmove_clock(), 57);
}

#[test]
fn test_fifty_move_rule_draw() {
    let pos = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1").unwrap();
    assert!(pos.is_fifty_move_draw());
}

#[test]
fn test_halfmove_resets_on_pawn_move() {
    let pos = Position::from_fen("8/8/8/8/8/8/4P3/K1k5 w - - 99 1").unwrap();
    let next = pos.after(pos.parse_move("e2e4").unwrap());
    assert_eq!(next.halfmove_clock(), 0);
    assert!(!next.is_fifty_move_draw());
}

#[test]
fn test_halfmove_counts_quiet_moves() {
    let pos = Position::from_fen("8/8/8/8/8/8/4P3/K1k5 w - - 99 1").unwrap();
    let next = pos.after(pos.parse_move("a1a2").unwrap());
    assert_eq!(next.halfmove_clock(), 100);
    assert!(next.is_fifty_move_draw());
}

#[test]
fn test_threefold_repetition() {
    let mut stack = PositionStack::new(Position::new());
    for _ in 0..2 {
        play_all(&mut stack, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    }
    assert!(stack.is_third_repetition());
    assert_eq!(stack.repetitions(), 2);
}

#[test]
fn test_repetition_needs_same_side_to_move() {
    // The knights come home after three plies each, but with the other side to move.
    let mut stack = PositionStack::new(Position::new());
    play_all(&mut stack, &["g1f3", "g8f6", "f3g1"]);
    assert!(!stack.is_repetition());
}

#[test]
fn test_insufficient_material() {
    let cases = [
        ("8/8/8/8/8/8/8/K1k5 w - - 0 1", true),
        ("8/8/8/8/8/8/6N1/K1k5 w - - 0 1", true),
        ("8/8/8/8/8/8/6B1/K1k5 w - - 0 1", true),
        // Bishops on the same square color.
        ("8/8/8/8/8/5b2/6B1/K1k5 w - - 0 1", true),
        // Bishops on opposite colors can still mate.
        ("8/8/8/8/8/6b1/6B1/K1k5 w - - 0 1", false),
        ("8/8/8/8/8/8/5NN1/K1k5 w - - 0 1", false),
        ("8/8/8/8/8/8/6P1/K1k5 w - - 0 1", false),
        ("8/8/8/8/8/8/6R1/K1k5 w - - 0 1", false),
    ];
    for (fen, expected) in cases {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.insufficient_material(), expected, "{fen}");
    }
}

#[test]
fn test_push_pop_keeps_repetition_window() {
    let mut stack = PositionStack::new(Position::new());
    play_all(&mut stack, &["g1f3", "g8f6", "f3g1"]);
    let mv = stack.current().parse_move("f6g8").unwrap();
    stack.push_move(mv);
    assert!(stack.is_repetition());
    stack.pop();
    assert!(!stack.is_repetition());
}
