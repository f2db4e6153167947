use grid_maze::{generate, Algorithm, MazeStrategy};
use rand::{rngs::StdRng, SeedableRng};

// Generates one maze with each strategy from a fixed seed, prints it and solves it with A*.
// Pass a seed as the first argument to see other layouts.
fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    for strategy in [
        MazeStrategy::random_density(),
        MazeStrategy::RandomizedCarve,
        MazeStrategy::RecursiveDivision,
    ] {
        let maze = generate(strategy, 11, 21, &mut rng).unwrap();
        println!("{}:\n{}", strategy, maze);
        match maze.solve(Algorithm::AStar) {
            Ok(path) => println!("Solved in {} steps\n", path.len() + 1),
            Err(err) => println!("{}\n", err),
        }
    }
}
