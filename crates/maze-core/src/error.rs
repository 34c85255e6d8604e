//! Error types for grid construction and maze validation.

use std::fmt;

use crate::geom::Point;

/// Errors raised while building or querying a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate query fell outside the grid.
    OutOfBounds(Point),
    /// A path steps onto a wall.
    Impassable(Point),
    /// Row `row` has `found` cells where `expected` were required.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A non-wall cell carries a negative cost.
    NegativeCost { point: Point, cost: i32 },
    /// The grid has no cells.
    Empty,
    /// The flat cell buffer does not match `rows * cols`.
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "grid: coordinate {p} is out of bounds"),
            Self::Impassable(p) => write!(f, "grid: cell {p} is a wall"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::NegativeCost { point, cost } => {
                write!(f, "grid: cell {point} has negative cost {cost}")
            }
            Self::Empty => write!(f, "grid: no cells"),
            Self::SizeMismatch { expected, found } => {
                write!(f, "grid: expected {expected} cells, got {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors raised while validating a [`Maze`](crate::Maze).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The start cell is out of bounds or a wall.
    StartInvalid(Point),
    /// The goal cell is out of bounds or a wall.
    GoalInvalid(Point),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartInvalid(p) => write!(f, "maze: start {p} is not a passable cell"),
            Self::GoalInvalid(p) => write!(f, "maze: goal {p} is not a passable cell"),
        }
    }
}

impl std::error::Error for MazeError {}
