use grid_maze::{explore, Algorithm, Grid, Position};

// Weighted cells (~) cost ten times as much to enter. Breadth-first search walks straight
// through them, while Dijkstra and A* take the longer but cheaper way around. A* gets there
// while expanding fewer cells.
fn main() {
    env_logger::init();
    let grid: Grid = "S~~~T\n.~~~.\n.....".parse().unwrap();
    println!("{}", grid);
    let start = Position::new(0, 0);
    let target = Position::new(0, 4);
    for algorithm in Algorithm::ALL {
        let exploration = explore(algorithm, &grid, start, target).unwrap();
        let Some(path) = exploration.path else {
            println!("{}: no path", algorithm);
            continue;
        };
        println!(
            "{:<22} steps {:>2}, cost {:>2}, expanded {:>2} cells",
            algorithm.to_string(),
            path.len() + 1,
            grid.route_cost(start, &path, target).unwrap_or_default(),
            exploration.expanded.len()
        );
    }
}
