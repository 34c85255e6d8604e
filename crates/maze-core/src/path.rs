//! Path utilities shared by every solver.
//!
//! A path is an ordered `Vec<Point>`; consecutive points are orthogonally
//! adjacent and every point is a passable cell.

use std::collections::HashMap;

use crate::error::GridError;
use crate::geom::Point;
use crate::grid::{Grid, WALL};

/// Cost of `path`: the sum of the costs of every cell after the first.
///
/// Works for whole paths and for sub-slices alike, so the cost of the
/// segment between positions `i` and `j` is `path_cost(grid, &path[i..=j])`.
/// An empty or single-point path costs 0.
pub fn path_cost(grid: &Grid, path: &[Point]) -> Result<i64, GridError> {
    let mut total = 0i64;
    for &p in path.iter().skip(1) {
        let c = grid.cost_of(p)?;
        if c == WALL {
            return Err(GridError::Impassable(p));
        }
        total += i64::from(c);
    }
    Ok(total)
}

/// Whether `path` is non-empty, stays on passable cells, and moves one
/// orthogonal step at a time.
pub fn is_valid_path(grid: &Grid, path: &[Point]) -> bool {
    !path.is_empty()
        && path.iter().all(|&p| grid.is_valid(p))
        && path.windows(2).all(|w| w[0].is_adjacent(w[1]))
}

/// Whether `path` is valid and runs from `start` to `goal`.
pub fn is_complete(grid: &Grid, path: &[Point], start: Point, goal: Point) -> bool {
    path.first() == Some(&start) && path.last() == Some(&goal) && is_valid_path(grid, path)
}

/// Cut every cycle out of `path`.
///
/// When a point reappears, everything after its first occurrence up to
/// and including the repeat is dropped. Adjacency is preserved, the first
/// and last points are kept, and since costs are non-negative the cost
/// never increases.
pub fn remove_loops(path: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(path.len());
    let mut seen: HashMap<Point, usize> = HashMap::with_capacity(path.len());
    for &p in path {
        if let Some(&k) = seen.get(&p) {
            for q in out.drain(k + 1..) {
                seen.remove(&q);
            }
            continue;
        }
        seen.insert(p, out.len());
        out.push(p);
    }
    out
}

/// Replace `path[i..=j]` with `segment`, whose first and last points must
/// equal `path[i]` and `path[j]`.
pub fn splice(path: &[Point], i: usize, j: usize, segment: &[Point]) -> Vec<Point> {
    debug_assert!(i < j && j < path.len());
    debug_assert_eq!(segment.first(), path.get(i));
    debug_assert_eq!(segment.last(), path.get(j));
    let mut out = Vec::with_capacity(path.len() - (j - i + 1) + segment.len());
    out.extend_from_slice(&path[..i]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&path[j + 1..]);
    out
}
