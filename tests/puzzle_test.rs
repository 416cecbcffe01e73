//! Checks the sliding-puzzle engine against a brute-force BFS over the full
//! 3x3 state graph, which is small enough (9!/2 reachable states) to
//! enumerate as ground truth.
use arcade_search::sliding_puzzle::{generate_solvable, scramble, solve, TileState};
use itertools::Itertools;
use rand::prelude::*;
use std::collections::{HashMap, VecDeque};

/// BFS from the solved state over legal blank moves. Distances double as a
/// reachability set and as optimal move counts, since blank moves are
/// self-inverse.
fn bfs_distances() -> HashMap<TileState, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(TileState::solved(), 0);
    queue.push_back(TileState::solved());
    while let Some(state) = queue.pop_front() {
        let depth = distances[&state];
        for index in 0..9 {
            if let Some(next) = state.slide(index) {
                if !distances.contains_key(&next) {
                    distances.insert(next, depth + 1);
                    queue.push_back(next);
                }
            }
        }
    }
    distances
}

fn assert_legal_solution(initial: &TileState, path: &[TileState]) {
    assert_eq!(path.first(), Some(initial));
    assert!(path.last().unwrap().is_solved());
    for pair in path.windows(2) {
        // Consecutive states must differ by one legal blank swap.
        let moved: Vec<usize> = (0..9)
            .filter(|&i| pair[0].cells()[i] != pair[1].cells()[i])
            .collect();
        assert_eq!(moved.len(), 2);
        let slid = moved
            .iter()
            .find(|&&i| pair[0].cells()[i] != 0)
            .copied()
            .unwrap();
        assert_eq!(pair[0].slide(slid), Some(pair[1]));
    }
}

#[test]
fn parity_matches_exhaustive_reachability() {
    let reachable = bfs_distances();
    assert_eq!(reachable.len(), 181440); // 9! / 2
    let mut checked = 0;
    for perm in (0..9u8).permutations(9) {
        let cells: [u8; 9] = perm.try_into().unwrap();
        let state = TileState::new(cells).unwrap();
        assert_eq!(state.is_solvable(), reachable.contains_key(&state));
        checked += 1;
    }
    assert_eq!(checked, 362880); // 9!
}

#[test]
fn solve_is_optimal_on_scrambles() {
    let distances = bfs_distances();
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..200 {
        let depth = rng.gen_range(0..=20);
        let initial = scramble(depth, &mut rng);
        let path = solve(&initial).unwrap();
        assert_legal_solution(&initial, &path);
        assert_eq!(path.len() - 1, distances[&initial]);
    }
}

#[test]
fn solve_rejects_odd_parity() {
    let unsolvable = TileState::new([1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
    assert!(!unsolvable.is_solvable());
    assert_eq!(solve(&unsolvable), None);
}

#[test]
fn one_move_from_solved() {
    let initial = TileState::new([1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
    let path = solve(&initial).unwrap();
    assert_eq!(path, vec![initial, TileState::solved()]);
}

#[test]
fn generated_scrambles_are_solvable() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let state = generate_solvable(&mut rng);
        assert!(state.is_solvable());
        let path = solve(&state).unwrap();
        assert_legal_solution(&state, &path);
        // A 5-move scramble is never more than 5 optimal moves out.
        assert!(path.len() - 1 <= 5);
    }
}
