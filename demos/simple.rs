use grid_maze::{search, Algorithm, Grid, Position};

// In this example every strategy looks for a route on a 5x5 grid with shape
// S . . . .
// . # # # .
// . . . # .
// # # . # .
// . . . . T
// S marks the start
// T marks the target
fn main() {
    env_logger::init();
    let grid: Grid = "S....\n.###.\n...#.\n##.#.\n....T".parse().unwrap();
    println!("{}", grid);
    let start = Position::new(0, 0);
    let target = Position::new(4, 4);
    for algorithm in Algorithm::ALL {
        match search(algorithm, &grid, start, target) {
            Ok(path) => {
                println!("{} found a path through {} cells:", algorithm, path.len());
                for p in path {
                    println!("\t{}", p);
                }
            }
            Err(err) => println!("{}: {}", algorithm, err),
        }
    }
}
