use arcade_search::{arena_start, PathingGrid};
use grid_util::point::Point;
use rand::prelude::*;

// Generates the 15x15 bordered arena of the grid game and walks the agent
// from its fixed start to a food cell, printing one step at a time the way
// the presentation layer would replay it.
fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let arena = PathingGrid::random_arena(15, 50, &mut rng);
    println!("{}", arena);
    let start = arena_start();
    let food = Point::new(13, 13);
    match arena.find_path(start, food).unwrap() {
        Some(path) => {
            println!("A path has been found:");
            for p in path {
                println!("{:?}", p);
            }
        }
        None => println!("The food at {} cannot be reached", food),
    }
}
