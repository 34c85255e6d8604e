use crate::geom::Point;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::result::SolveResult;

/// A routing strategy.
///
/// A solve is synchronous and self-contained: it keeps all working state
/// local to the call, so one solver value may serve many threads at once.
pub trait Solver: Send + Sync {
    /// Short display name, e.g. `"A*"`.
    fn name(&self) -> &str;

    /// Route from `start` to `goal` over `grid`.
    ///
    /// Both endpoints must be passable cells of `grid`. Failures are
    /// reported through [`SolveStatus::Failed`](crate::SolveStatus::Failed),
    /// never by panicking.
    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> SolveResult;

    /// Route across a validated [`Maze`].
    fn solve_maze(&self, maze: &Maze) -> SolveResult {
        self.solve(maze.grid(), maze.start(), maze.goal())
    }
}
