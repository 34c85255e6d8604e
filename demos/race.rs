//! Race Dijkstra, A* and the genetic engine across the built-in maze.
//!
//! Run: cargo run --bin maze-race [seed]

use maze_demos::{DEMO_MAZE, parse_maze, race, render};
use maze_genetic::GeneticConfig;

fn main() {
    let maze = match parse_maze(DEMO_MAZE) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut config = GeneticConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(seed) => config = config.with_seed(seed),
            Err(e) => {
                eprintln!("Error: bad seed {arg:?}: {e}");
                std::process::exit(2);
            }
        }
    }

    let results = match race(&maze, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for (name, r) in &results {
        println!(
            "{name:<9} {:?}  cost {:>3}  steps {:>3}  expanded {:>6}  {:.2?}",
            r.status,
            r.cost,
            r.path.len().saturating_sub(1),
            r.nodes_expanded,
            r.elapsed
        );
        print!("{}", render(&maze, &r.path));
        println!();
    }
}
