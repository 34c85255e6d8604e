//! Shortcut and loop-removal passes over a finished path.
//!
//! Repair runs whole passes until one changes nothing. Every change either
//! strictly lowers the cost (a shortcut) or drops a cycle (never raising
//! the cost), so the result costs no more than the input. Running repair on
//! its own output returns that output unchanged.

use maze_core::path::{path_cost, remove_loops, splice};
use maze_core::{Grid, Point};
use maze_paths::LocalSearch;

/// Path repair limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairConfig {
    /// Positions ahead of `i` considered as shortcut targets.
    pub window: usize,
    /// Expansion cap for one shortcut search.
    pub expansion_limit: usize,
    /// Cap on full passes.
    pub max_passes: usize,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            window: 24,
            expansion_limit: 2000,
            max_passes: 64,
        }
    }
}

/// Memetic polish for candidate paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathRepair {
    config: RepairConfig,
}

impl PathRepair {
    pub fn new(config: RepairConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RepairConfig {
        self.config
    }

    /// Repair `path` with freshly allocated search buffers.
    pub fn repair(&self, grid: &Grid, path: &[Point]) -> Vec<Point> {
        let mut local = LocalSearch::for_grid(grid);
        self.repair_with(grid, path, &mut local)
    }

    /// Repair `path`, reusing `local` for the shortcut searches.
    pub fn repair_with(&self, grid: &Grid, path: &[Point], local: &mut LocalSearch) -> Vec<Point> {
        let mut current = path.to_vec();
        for pass in 0..self.config.max_passes {
            let (next, changed) = self.pass(grid, current, local);
            current = next;
            if !changed {
                return current;
            }
            log::trace!("repair pass {pass}: {} points", current.len());
        }
        log::debug!(
            "repair stopped after {} passes without reaching a fixed point",
            self.config.max_passes
        );
        current
    }

    fn pass(&self, grid: &Grid, path: Vec<Point>, local: &mut LocalSearch) -> (Vec<Point>, bool) {
        let mut path = {
            let cut = remove_loops(&path);
            if cut.len() != path.len() {
                return (cut, true);
            }
            path
        };
        let mut changed = false;
        let mut i = 0;
        while i + 2 < path.len() {
            let far = (i + self.config.window).min(path.len() - 1);
            let mut jumped = false;
            for j in (i + 2..=far).rev() {
                let Ok(original) = path_cost(grid, &path[i..=j]) else {
                    continue;
                };
                if let Some(segment) = self.shortcut(grid, path[i], path[j], original, local) {
                    let len = segment.len();
                    path = splice(&path, i, j, &segment);
                    i += len - 1;
                    changed = true;
                    jumped = true;
                    break;
                }
            }
            if !jumped {
                i += 1;
            }
        }
        (path, changed)
    }

    /// A route from `a` to `b` costing strictly less than `bound`: a
    /// straight or single-bend line when one is clear and cheap enough,
    /// else a capped cheapest-path search.
    fn shortcut(
        &self,
        grid: &Grid,
        a: Point,
        b: Point,
        bound: i64,
        local: &mut LocalSearch,
    ) -> Option<Vec<Point>> {
        let best_line = [Point::new(a.row, b.col), Point::new(b.row, a.col)]
            .into_iter()
            .filter_map(|corner| bent_line(grid, a, corner, b))
            .filter_map(|line| path_cost(grid, &line).ok().map(|c| (c, line)))
            .min_by_key(|(c, _)| *c);
        if let Some((c, line)) = best_line {
            if c < bound {
                return Some(line);
            }
        }
        local
            .cheapest_path(grid, a, b, self.config.expansion_limit, bound)
            .map(|(segment, _)| segment)
    }
}

/// Straight steps from `a` to `corner`, then from `corner` to `b`, or
/// `None` if a wall is in the way.
fn bent_line(grid: &Grid, a: Point, corner: Point, b: Point) -> Option<Vec<Point>> {
    let mut line = vec![a];
    for target in [corner, b] {
        let mut cur = *line.last()?;
        let step = Point::new((target.row - cur.row).signum(), (target.col - cur.col).signum());
        while cur != target {
            cur = cur + step;
            if !grid.is_valid(cur) {
                return None;
            }
            line.push(cur);
        }
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{Walk, Walker};
    use maze_core::path::is_complete;
    use maze_core::{Solver, WALL};
    use maze_paths::Dijkstra;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn bent_line_stops_at_walls() {
        let g = Grid::filled(3, 3, 1)
            .unwrap()
            .with_walls([Point::new(0, 1)])
            .unwrap();
        let a = Point::new(0, 0);
        let b = Point::new(2, 2);
        assert!(bent_line(&g, a, Point::new(0, 2), b).is_none());
        let l = bent_line(&g, a, Point::new(2, 0), b).unwrap();
        assert_eq!(l, pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
    }

    #[test]
    fn removes_detours_on_open_grid() {
        let g = Grid::filled(4, 4, 1).unwrap();
        let meander = pts(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 1),
            (0, 1),
            (0, 2),
            (1, 2),
            (2, 2),
            (3, 2),
            (3, 3),
        ]);
        let fixed = PathRepair::default().repair(&g, &meander);
        assert!(is_complete(&g, &fixed, Point::new(0, 0), Point::new(3, 3)));
        assert_eq!(path_cost(&g, &fixed), Ok(6));
    }

    #[test]
    fn cuts_loops() {
        let g = Grid::filled(3, 3, 1).unwrap();
        let looped = pts(&[(0, 0), (0, 1), (1, 1), (1, 0), (0, 0), (0, 1), (0, 2)]);
        let fixed = PathRepair::default().repair(&g, &looped);
        assert_eq!(fixed, pts(&[(0, 0), (0, 1), (0, 2)]));
    }

    #[test]
    fn optimal_path_is_untouched() {
        let g = Grid::from_rows(vec![vec![1, 9, 1], vec![1, 1, 1]]).unwrap();
        let best = pts(&[(0, 0), (1, 0), (1, 1), (1, 2), (0, 2)]);
        assert_eq!(PathRepair::default().repair(&g, &best), best);
    }

    #[test]
    fn idempotent_and_non_increasing_on_random_walks() {
        let mut rng = StdRng::seed_from_u64(0xbadcafe);
        let repair = PathRepair::default();
        let mut checked = 0;
        for _ in 0..80 {
            let rows = rng.random_range(3..12);
            let cols = rng.random_range(3..12);
            let cells = (0..rows * cols)
                .map(|_| {
                    if rng.random_range(0..100) < 25 {
                        WALL
                    } else {
                        rng.random_range(1..9)
                    }
                })
                .collect();
            let grid = Grid::new(rows, cols, cells).unwrap();
            let start = grid.point(rng.random_range(0..grid.len()));
            let goal = grid.point(rng.random_range(0..grid.len()));
            if !grid.is_valid(start) || !grid.is_valid(goal) || start == goal {
                continue;
            }
            let walker = Walker {
                step_limit: 10 * grid.len(),
                goal_bias: 0.3,
            };
            let Walk::Reached(raw) = walker.walk(&grid, start, goal, &mut rng) else {
                continue;
            };
            let once = repair.repair(&grid, &raw);
            let twice = repair.repair(&grid, &once);
            assert_eq!(once, twice);
            assert!(is_complete(&grid, &once, start, goal));
            let before = path_cost(&grid, &raw).unwrap();
            let after = path_cost(&grid, &once).unwrap();
            assert!(after <= before);
            let optimum = Dijkstra::dijkstra().solve(&grid, start, goal).cost;
            assert!(after >= optimum);
            checked += 1;
        }
        assert!(checked > 0);
    }
}
