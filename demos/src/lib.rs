//! Shared helpers for the demo binaries: ASCII mazes in, rendered routes
//! out, and a three-way solver race.
//!
//! Maze text uses one character per cell:
//!
//! | Char | Cell |
//! |---|---|
//! | `#` | wall |
//! | `.` | cost 1 |
//! | `0`-`9` | that cost |
//! | `S` / `G` | start / goal, cost 1 |

use std::fmt;
use std::thread;

use maze_core::{Grid, GridError, Maze, MazeError, Point, SolveResult, Solver, WALL};
use maze_genetic::{ConfigError, GeneticConfig, GeneticSolver};
use maze_paths::{AStar, Dijkstra};

pub const DEMO_MAZE: &str = "\
S..#......#.....
.#.#.####.#.###.
.#...#..#...#...
.#####.##.###.#.
...9...#..5...#.
##.###.#.####.#.
...#...#....#...
.#.#.#####.##.##
.#...#.....9....
.###.#.###.####.
...#...#.......G";

/// Why a maze text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownChar { row: usize, col: usize, ch: char },
    MissingStart,
    MissingGoal,
    DuplicateEndpoint(char),
    Grid(GridError),
    Maze(MazeError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChar { row, col, ch } => {
                write!(f, "maze: unknown character {ch:?} at ({row}, {col})")
            }
            Self::MissingStart => write!(f, "maze: no start cell 'S'"),
            Self::MissingGoal => write!(f, "maze: no goal cell 'G'"),
            Self::DuplicateEndpoint(ch) => write!(f, "maze: more than one {ch:?}"),
            Self::Grid(e) => write!(f, "maze: {e}"),
            Self::Maze(e) => write!(f, "maze: {e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<GridError> for ParseError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<MazeError> for ParseError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}

/// Parse maze text. Blank lines and surrounding whitespace are ignored.
pub fn parse_maze(text: &str) -> Result<Maze, ParseError> {
    let mut rows = Vec::new();
    let mut start = None;
    let mut goal = None;
    for (r, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (c, ch) in line.chars().enumerate() {
            let here = Point::new(r as i32, c as i32);
            let cost = match ch {
                '#' => WALL,
                '.' => 1,
                'S' | 'G' => {
                    let slot = if ch == 'S' { &mut start } else { &mut goal };
                    if slot.replace(here).is_some() {
                        return Err(ParseError::DuplicateEndpoint(ch));
                    }
                    1
                }
                d if d.is_ascii_digit() => i32::from(d as u8 - b'0'),
                _ => return Err(ParseError::UnknownChar { row: r, col: c, ch }),
            };
            row.push(cost);
        }
        rows.push(row);
    }
    let start = start.ok_or(ParseError::MissingStart)?;
    let goal = goal.ok_or(ParseError::MissingGoal)?;
    let grid = Grid::from_rows(rows)?;
    Ok(Maze::new(grid, start, goal)?)
}

/// Draw `path` over the maze, marking route cells with `*`.
pub fn render(maze: &Maze, path: &[Point]) -> String {
    let grid = maze.grid();
    let mut out = String::with_capacity(grid.len() + grid.rows());
    for r in 0..grid.rows() as i32 {
        for c in 0..grid.cols() as i32 {
            let p = Point::new(r, c);
            let ch = if p == maze.start() {
                'S'
            } else if p == maze.goal() {
                'G'
            } else if grid.is_wall(p) {
                '#'
            } else if path.contains(&p) {
                '*'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Solve `maze` with Dijkstra, A* and the genetic engine, each on its own
/// thread. Results come back in that order, paired with the solver name.
pub fn race(
    maze: &Maze,
    config: GeneticConfig,
) -> Result<Vec<(String, SolveResult)>, ConfigError> {
    let genetic = GeneticSolver::new(config)?;
    let dijkstra = Dijkstra::dijkstra();
    let astar = AStar::astar();
    let solvers: [&dyn Solver; 3] = [&dijkstra, &astar, &genetic];
    let results: Vec<(String, SolveResult)> = thread::scope(|s| {
        let handles: Vec<_> = solvers
            .iter()
            .map(|&solver| s.spawn(move || (solver.name().to_string(), solver.solve_maze(maze))))
            .collect();
        handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .collect()
    });
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_demo_maze() {
        let maze = parse_maze(DEMO_MAZE).unwrap();
        assert_eq!(maze.grid().rows(), 11);
        assert_eq!(maze.grid().cols(), 16);
        assert_eq!(maze.start(), Point::new(0, 0));
        assert_eq!(maze.goal(), Point::new(10, 15));
        assert_eq!(maze.grid().cost_of(Point::new(4, 3)), Ok(9));
    }

    #[test]
    fn rejects_bad_text() {
        assert_eq!(parse_maze("S.\n.."), Err(ParseError::MissingGoal));
        assert_eq!(parse_maze(".G"), Err(ParseError::MissingStart));
        assert_eq!(parse_maze("SGS"), Err(ParseError::DuplicateEndpoint('S')));
        assert!(matches!(
            parse_maze("S?G"),
            Err(ParseError::UnknownChar { ch: '?', .. })
        ));
        assert!(matches!(parse_maze("S.\n.G."), Err(ParseError::Grid(_))));
    }

    #[test]
    fn renders_route() {
        let maze = parse_maze("S.\n#G").unwrap();
        let path = vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)];
        assert_eq!(render(&maze, &path), "S*\n#G\n");
    }

    #[test]
    fn race_agrees_on_cost() {
        let maze = parse_maze(DEMO_MAZE).unwrap();
        let results = race(&maze, GeneticConfig::default().with_seed(3)).unwrap();
        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Dijkstra", "A*", "Genetic"]);
        assert!(results.iter().all(|(_, r)| r.is_success()));
        assert_eq!(results[0].1.cost, results[1].1.cost);
        assert!(results[2].1.cost >= results[0].1.cost);
    }
}
