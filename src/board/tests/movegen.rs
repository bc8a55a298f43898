//! Generator cross-checks: each specialised generator agrees with brute
//! force over the full pseudo-legal set.

use crate::board::{Color, Move, MoveList, Position, Promotions};

const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    // In check from a bishop, with interpositions available.
    "rnbqk1nr/pppp1ppp/8/4p3/1b1P4/8/PPP1PPPP/RNBQKBNR w KQkq - 1 3",
    // Double check.
    "4k3/8/8/8/8/2n5/8/r2K3R w - - 0 1",
    // Pawn check that en passant answers.
    "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1",
];

fn sorted(moves: impl IntoIterator<Item = Move>) -> Vec<u32> {
    let mut raw: Vec<u32> = moves.into_iter().map(Move::as_u32).collect();
    raw.sort_unstable();
    raw
}

fn brute_force_legal(pos: &Position) -> Vec<u32> {
    let us = pos.side_to_move();
    let mut all = MoveList::new();
    pos.generate_captures(&mut all, Promotions::All);
    pos.generate_quiets(&mut all);
    sorted(
        all.iter()
            .copied()
            .filter(|&mv| !mv.is_castling() || !pos.in_check(us))
            .filter(|&mv| !pos.after(mv).in_check(us)),
    )
}

#[test]
fn test_legal_moves_match_brute_force() {
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(
            sorted(pos.legal_moves().iter().copied()),
            brute_force_legal(&pos),
            "legal set differs for {fen}"
        );
    }
}

#[test]
fn test_evasions_cover_every_legal_reply() {
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        if !pos.in_check(pos.side_to_move()) {
            continue;
        }
        let mut evasions = MoveList::new();
        pos.generate_evasions(&mut evasions);
        for mv in &brute_force_legal(&pos) {
            assert!(
                evasions.contains(Move::from_u32(*mv)),
                "evasions miss {} in {fen}",
                Move::from_u32(*mv)
            );
        }
    }
}

#[test]
fn test_captures_and_quiets_partition() {
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        let mut captures = MoveList::new();
        let mut quiets = MoveList::new();
        pos.generate_captures(&mut captures, Promotions::All);
        pos.generate_quiets(&mut quiets);

        for mv in &captures {
            assert!(mv.is_capture() || mv.is_promotion(), "{mv} in captures");
            assert!(!quiets.contains(*mv));
        }
        for mv in &quiets {
            assert!(mv.is_quiet(), "{mv} in quiets");
        }
    }
}

#[test]
fn test_queen_only_promotions() {
    let pos = Position::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let mut queen_only = MoveList::new();
    pos.generate_captures(&mut queen_only, Promotions::QueenOnly);
    let mut all = MoveList::new();
    pos.generate_captures(&mut all, Promotions::All);
    assert_eq!(queen_only.len(), 2);
    assert_eq!(all.len(), 8);
}

#[test]
fn test_generated_checks_give_check() {
    for fen in POSITIONS {
        let pos = Position::from_fen(fen).unwrap();
        if pos.in_check(pos.side_to_move()) {
            continue;
        }
        let them = pos.side_to_move().opponent();
        let mut checks = MoveList::new();
        pos.generate_checks(&mut checks);
        let mut quiets = MoveList::new();
        pos.generate_quiets(&mut quiets);

        for &mv in &quiets {
            let checking = pos.after(mv).in_check(them);
            assert_eq!(pos.gives_check(mv), checking, "{mv} in {fen}");
            assert_eq!(checks.contains(mv), checking, "{mv} in {fen}");
        }
    }
}

#[test]
fn test_pseudo_legal_accepts_generated_rejects_foreign() {
    let start = Position::new();
    let kiwipete = Position::from_fen(POSITIONS[1]).unwrap();

    let mut own = MoveList::new();
    kiwipete.generate_moves(&mut own);
    for &mv in &own {
        assert!(kiwipete.is_pseudo_legal(mv), "{mv} rejected");
    }

    let mut foreign = MoveList::new();
    start.generate_moves(&mut foreign);
    let rejected = foreign.iter().filter(|&&mv| !kiwipete.is_pseudo_legal(mv)).count();
    assert!(rejected > 0);
    assert!(!kiwipete.is_pseudo_legal(Move::null()));
}

#[test]
fn test_side_to_move_matters() {
    let white = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let black = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").unwrap();
    assert!(white.legal_moves().iter().any(|m| m.from() == "e2".parse().unwrap()));
    assert!(black.legal_moves().iter().all(|m| m.piece() == crate::board::Piece::King));
    assert_eq!(black.side_to_move(), Color::Black);
}
