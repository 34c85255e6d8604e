//! Randomized depth-first walks that seed the population.

use maze_core::{Grid, Point, manhattan};
use rand::{Rng, RngExt};

/// Outcome of one seeding walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Walk {
    /// A loop-free path from start to goal.
    Reached(Vec<Point>),
    /// Every cell reachable from the start was visited without finding the
    /// goal: no walk can ever succeed.
    Exhausted,
    /// The step cap was hit first.
    StepLimit,
}

/// Goal-biased randomized depth-first walker.
///
/// At each step the walker moves to an unvisited passable neighbour: the
/// one closest to the goal with probability `goal_bias`, a uniformly random
/// one otherwise. Dead ends are backtracked. The walk stack is always a
/// valid loop-free path from the start.
#[derive(Debug, Clone, Copy)]
pub struct Walker {
    pub step_limit: usize,
    pub goal_bias: f64,
}

impl Walker {
    /// Walk from `start` until `goal` is reached, the reachable region is
    /// exhausted, or `step_limit` moves (forward or back) have been made.
    pub fn walk(&self, grid: &Grid, start: Point, goal: Point, rng: &mut impl Rng) -> Walk {
        let (Some(si), true) = (grid.index(start), grid.is_valid(start)) else {
            return Walk::Exhausted;
        };
        let mut visited = vec![false; grid.len()];
        visited[si] = true;
        let mut stack = vec![start];
        let mut candidates: Vec<Point> = Vec::with_capacity(4);
        let mut steps = 0usize;

        while let Some(&cur) = stack.last() {
            if cur == goal {
                return Walk::Reached(stack);
            }
            if steps >= self.step_limit {
                return Walk::StepLimit;
            }
            steps += 1;

            candidates.clear();
            candidates.extend(
                grid.neighbors(cur)
                    .filter(|&n| grid.index(n).is_some_and(|i| !visited[i])),
            );
            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let next = if rng.random_bool(self.goal_bias) {
                candidates
                    .iter()
                    .copied()
                    .min_by_key(|&n| manhattan(n, goal))
                    .unwrap_or(candidates[0])
            } else {
                candidates[rng.random_range(0..candidates.len())]
            };
            if let Some(ni) = grid.index(next) {
                visited[ni] = true;
            }
            stack.push(next);
        }

        Walk::Exhausted
    }
}
