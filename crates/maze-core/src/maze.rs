//! The [`Maze`] bundle: a grid plus its start and goal cells.
//!
//! Solvers receive start and goal explicitly, never through shared state,
//! so concurrent solves over different mazes cannot interfere.

use crate::error::MazeError;
use crate::geom::Point;
use crate::grid::Grid;

/// A validated routing problem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MazeRepr", into = "MazeRepr")
)]
pub struct Maze {
    grid: Grid,
    start: Point,
    goal: Point,
}

impl Maze {
    /// Bundle a grid with its endpoints. Both endpoints must be in bounds
    /// and passable.
    pub fn new(grid: Grid, start: Point, goal: Point) -> Result<Self, MazeError> {
        if !grid.is_valid(start) {
            return Err(MazeError::StartInvalid(start));
        }
        if !grid.is_valid(goal) {
            return Err(MazeError::GoalInvalid(goal));
        }
        Ok(Self { grid, start, goal })
    }

    /// The cost grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The goal cell.
    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Split back into its parts.
    pub fn into_parts(self) -> (Grid, Point, Point) {
        (self.grid, self.start, self.goal)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MazeRepr {
    grid: Grid,
    start: Point,
    goal: Point,
}

#[cfg(feature = "serde")]
impl TryFrom<MazeRepr> for Maze {
    type Error = MazeError;

    fn try_from(r: MazeRepr) -> Result<Self, Self::Error> {
        Maze::new(r.grid, r.start, r.goal)
    }
}

#[cfg(feature = "serde")]
impl From<Maze> for MazeRepr {
    fn from(m: Maze) -> Self {
        let (grid, start, goal) = m.into_parts();
        MazeRepr { grid, start, goal }
    }
}
