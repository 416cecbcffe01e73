use arcade_search::sliding_puzzle::{generate_solvable, solve};
use rand::prelude::*;

// Scrambles the 3x3 puzzle and prints the optimal solution sequence.
fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let initial = generate_solvable(&mut rng);
    println!("Scrambled arrangement:\n{}", initial);
    let path = solve(&initial).expect("generated scrambles are solvable");
    println!("Solved in {} moves:", path.len() - 1);
    for state in path {
        println!("{}", state);
    }
}
