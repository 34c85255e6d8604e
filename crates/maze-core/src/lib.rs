//! **maze-core**: weighted maze routing (core types).
//!
//! This crate provides the foundational types shared by every solver in the
//! workspace: grid coordinates, the immutable cost [`Grid`], the [`Maze`]
//! bundle handed to solvers, path utilities, and the [`SolveResult`] record
//! solvers return.
//!
//! # Cost convention
//!
//! The cost of a path is the sum of the costs of every cell entered after
//! the start cell. The start cell never contributes; the goal cell does.
//! [`path::path_cost`] is the single implementation of this rule and every
//! solver reports costs through it or an equivalent accumulation.

pub mod error;
pub mod geom;
pub mod grid;
pub mod maze;
pub mod path;
pub mod result;
pub mod solver;

pub use error::{GridError, MazeError};
pub use geom::{Point, manhattan};
pub use grid::{Grid, WALL};
pub use maze::Maze;
pub use result::{SolveResult, SolveStatus};
pub use solver::Solver;
