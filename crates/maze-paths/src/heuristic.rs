use maze_core::{Grid, Point, manhattan};

/// Estimate of the remaining cost from a cell to the goal.
///
/// Implementations must never overestimate (admissible) and must not drop
/// by more than the cost of the cell entered on any single step
/// (consistent). Both properties keep [`GridSearch`](crate::GridSearch)
/// optimal and let it expand each cell at most once.
pub trait Heuristic: Send + Sync {
    /// Lower bound on the cost of any path from `from` to `goal`.
    fn estimate(&self, grid: &Grid, from: Point, goal: Point) -> i64;
}

/// The zero heuristic: uniform-cost search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _grid: &Grid, _from: Point, _goal: Point) -> i64 {
        0
    }
}

/// Manhattan distance scaled by the grid's cheapest passable cell.
///
/// Every step enters a cell costing at least `grid.min_cost()`, so the
/// scaled distance stays a lower bound even when some cells are free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, grid: &Grid, from: Point, goal: Point) -> i64 {
        i64::from(manhattan(from, goal)) * i64::from(grid.min_cost())
    }
}
