//! Shortest-path search on weighted mazes.
//!
//! This crate provides:
//!
//! - **Dijkstra** and **A\*** as one solver, [`GridSearch`], parameterized
//!   by a [`Heuristic`] ([`Zero`] or [`Manhattan`]); see the [`Dijkstra`]
//!   and [`AStar`] aliases.
//! - [`ArrayHeap`], the array-backed min-heap both share. Stale entries are
//!   never removed from it; searches discard them when popped.
//! - [`LocalSearch`], capped BFS and cheapest-path queries between two
//!   cells, reusing its buffers across calls. The genetic engine uses it for
//!   mutation and path repair.
//!
//! # Heuristics
//!
//! | Heuristic | Solver |
//! |---|---|
//! | [`Zero`] | uniform-cost search (Dijkstra) |
//! | [`Manhattan`] | A* |

mod heap;
mod heuristic;
mod local;
mod search;

pub use heap::ArrayHeap;
pub use heuristic::{Heuristic, Manhattan, Zero};
pub use local::LocalSearch;
pub use search::{AStar, Dijkstra, GridSearch, UNREACHABLE};
