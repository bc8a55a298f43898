//! Perft node counts against published reference values.

use serde::Deserialize;

use chess_search::Position;

#[derive(Deserialize)]
struct Fixtures {
    perft: Vec<PerftCase>,
}

#[derive(Deserialize)]
struct PerftCase {
    name: String,
    fen: String,
    /// Node counts for depth 1, 2, ...
    nodes: Vec<u64>,
}

fn load() -> Vec<PerftCase> {
    let data = include_str!("data/positions.json");
    let fixtures: Fixtures = serde_json::from_str(data).expect("invalid positions.json");
    fixtures.perft
}

#[test]
fn perft_suite() {
    for case in load() {
        let pos = Position::from_fen(&case.fen).unwrap();
        for (depth, &expected) in case.nodes.iter().enumerate() {
            let depth = depth + 1;
            assert_eq!(
                pos.perft(depth),
                expected,
                "{} at depth {depth}",
                case.name
            );
        }
    }
}

#[test]
fn divide_sums_to_perft() {
    for case in load() {
        let pos = Position::from_fen(&case.fen).unwrap();
        let divide = pos.perft_divide(2);
        assert_eq!(divide.len() as u64, case.nodes[0], "{}", case.name);
        assert_eq!(
            divide.iter().map(|(_, n)| n).sum::<u64>(),
            case.nodes[1],
            "{}",
            case.name
        );
    }
}

#[test]
fn perft_startpos_depth_5() {
    assert_eq!(Position::new().perft(5), 4_865_609);
}
