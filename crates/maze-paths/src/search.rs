use std::time::Instant;

use maze_core::{Grid, Point, SolveResult, Solver};

use crate::heap::ArrayHeap;
use crate::heuristic::{Heuristic, Manhattan, Zero};

/// Distance of a cell not reached yet.
pub const UNREACHABLE: i64 = i64::MAX;

const NO_PARENT: usize = usize::MAX;

/// Best-first shortest-path search over a cost grid.
///
/// With [`Zero`] this is uniform-cost search (Dijkstra); with
/// [`Manhattan`] it is A*. Both return the same optimal cost; A* expands
/// no more cells than Dijkstra.
#[derive(Debug, Clone)]
pub struct GridSearch<H> {
    heuristic: H,
    name: &'static str,
}

/// Uniform-cost search.
pub type Dijkstra = GridSearch<Zero>;

/// Heuristic-guided search.
pub type AStar = GridSearch<Manhattan>;

impl GridSearch<Zero> {
    /// Dijkstra's algorithm.
    pub fn dijkstra() -> Self {
        Self::new(Zero, "Dijkstra")
    }
}

impl Default for GridSearch<Zero> {
    fn default() -> Self {
        Self::dijkstra()
    }
}

impl GridSearch<Manhattan> {
    /// A* with the Manhattan heuristic.
    pub fn astar() -> Self {
        Self::new(Manhattan, "A*")
    }
}

impl Default for GridSearch<Manhattan> {
    fn default() -> Self {
        Self::astar()
    }
}

impl<H: Heuristic> GridSearch<H> {
    /// A search driven by an arbitrary heuristic.
    pub fn new(heuristic: H, name: &'static str) -> Self {
        Self { heuristic, name }
    }

    /// The heuristic in use.
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<H: Heuristic> Solver for GridSearch<H> {
    fn name(&self) -> &str {
        self.name
    }

    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> SolveResult {
        let started = Instant::now();

        if start == goal {
            return SolveResult::trivial(start, started.elapsed());
        }
        if !grid.is_valid(start) || !grid.is_valid(goal) {
            log::debug!("{}: endpoint {start} or {goal} is not passable", self.name);
            return SolveResult::failed(started.elapsed(), 0);
        }
        let (Some(start_idx), Some(goal_idx)) = (grid.index(start), grid.index(goal)) else {
            return SolveResult::failed(started.elapsed(), 0);
        };

        let h = |p: Point| self.heuristic.estimate(grid, p, goal);

        let mut dist = vec![UNREACHABLE; grid.len()];
        let mut parent = vec![NO_PARENT; grid.len()];
        let mut open = ArrayHeap::for_cells(grid.len());
        let mut expanded = 0usize;

        dist[start_idx] = 0;
        open.push(start_idx, h(start));

        while let Some((ci, priority)) = open.pop_min() {
            let cp = grid.point(ci);

            // Skip stale entries.
            if priority > dist[ci] + h(cp) {
                continue;
            }
            expanded += 1;

            if ci == goal_idx {
                let path = reconstruct(grid, &parent, goal_idx);
                let cost = dist[goal_idx];
                log::debug!(
                    "{}: {start} -> {goal} cost {cost}, {} steps, {expanded} expanded",
                    self.name,
                    path.len() - 1
                );
                return SolveResult::success(path, cost, started.elapsed(), expanded);
            }

            let current_g = dist[ci];
            for np in grid.neighbors(cp) {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                let tentative = current_g + i64::from(grid.cost_at(ni));
                if tentative >= dist[ni] {
                    continue;
                }
                dist[ni] = tentative;
                parent[ni] = ci;
                if !open.push(ni, tentative + h(np)) {
                    log::warn!(
                        "{}: open list full at {} entries, giving up",
                        self.name,
                        open.capacity()
                    );
                    return SolveResult::failed(started.elapsed(), expanded);
                }
            }
        }

        log::debug!("{}: {goal} unreachable from {start}, {expanded} expanded", self.name);
        SolveResult::failed(started.elapsed(), expanded)
    }
}

fn reconstruct(grid: &Grid, parent: &[usize], goal_idx: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut ci = goal_idx;
    while ci != NO_PARENT {
        path.push(grid.point(ci));
        ci = parent[ci];
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::path::{is_complete, path_cost};
    use maze_core::{SolveStatus, WALL, manhattan};
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn solvers() -> (Dijkstra, AStar) {
        (Dijkstra::dijkstra(), AStar::astar())
    }

    /// Exact distances by repeated relaxation, independent of the heap.
    fn brute_force_cost(grid: &Grid, start: Point, goal: Point) -> Option<i64> {
        let mut dist = vec![UNREACHABLE; grid.len()];
        dist[grid.index(start)?] = 0;
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..grid.len() {
                if dist[i] == UNREACHABLE {
                    continue;
                }
                let p = grid.point(i);
                for n in grid.neighbors(p) {
                    let ni = grid.index(n)?;
                    let d = dist[i] + i64::from(grid.cost_at(ni));
                    if d < dist[ni] {
                        dist[ni] = d;
                        changed = true;
                    }
                }
            }
        }
        let d = dist[grid.index(goal)?];
        (d != UNREACHABLE).then_some(d)
    }

    fn random_grid(rng: &mut StdRng, rows: usize, cols: usize, wall_pct: u32) -> Grid {
        let cells = (0..rows * cols)
            .map(|_| {
                if rng.random_range(0..100) < wall_pct {
                    WALL
                } else {
                    rng.random_range(1..10)
                }
            })
            .collect();
        Grid::new(rows, cols, cells).unwrap()
    }

    #[test]
    fn centre_wall_three_by_three() {
        let grid = Grid::filled(3, 3, 1)
            .unwrap()
            .with_walls([Point::new(1, 1)])
            .unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(2, 2));
        let (d, a) = solvers();
        for r in [d.solve(&grid, start, goal), a.solve(&grid, start, goal)] {
            assert_eq!(r.status, SolveStatus::Success);
            assert_eq!(r.cost, 4);
            assert_eq!(r.path.len(), 5);
            assert!(!r.path.contains(&Point::new(1, 1)));
            assert!(is_complete(&grid, &r.path, start, goal));
        }
    }

    #[test]
    fn open_row_costs_manhattan_distance() {
        let grid = Grid::filled(4, 9, 1).unwrap();
        let (start, goal) = (Point::new(2, 1), Point::new(2, 7));
        let (d, a) = solvers();
        for r in [d.solve(&grid, start, goal), a.solve(&grid, start, goal)] {
            assert!(r.is_success());
            assert_eq!(r.cost, i64::from(manhattan(start, goal)));
        }
    }

    #[test]
    fn identical_endpoints_are_trivial() {
        let grid = Grid::filled(2, 2, 5).unwrap();
        let p = Point::new(1, 0);
        let (d, a) = solvers();
        for r in [d.solve(&grid, p, p), a.solve(&grid, p, p)] {
            assert_eq!(r.status, SolveStatus::Success);
            assert_eq!(r.path, vec![p]);
            assert_eq!(r.cost, 0);
        }
    }

    #[test]
    fn enclosed_goal_fails() {
        let grid = Grid::filled(5, 5, 1)
            .unwrap()
            .with_walls([
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(2, 1),
                Point::new(2, 3),
            ])
            .unwrap();
        let (d, a) = solvers();
        for r in [
            d.solve(&grid, Point::new(0, 0), Point::new(2, 2)),
            a.solve(&grid, Point::new(0, 0), Point::new(2, 2)),
        ] {
            assert_eq!(r.status, SolveStatus::Failed);
            assert_eq!(r.cost, -1);
            assert!(r.path.is_empty());
            assert!(r.nodes_expanded > 0);
        }
    }

    #[test]
    fn wall_endpoint_fails() {
        let grid = Grid::filled(2, 2, 1)
            .unwrap()
            .with_walls([Point::new(1, 1)])
            .unwrap();
        let r = Dijkstra::dijkstra().solve(&grid, Point::new(0, 0), Point::new(1, 1));
        assert_eq!(r.status, SolveStatus::Failed);
        let r = AStar::astar().solve(&grid, Point::new(0, 0), Point::new(5, 5));
        assert_eq!(r.status, SolveStatus::Failed);
    }

    #[test]
    fn prefers_cheap_detour() {
        let grid = Grid::from_rows(vec![
            vec![1, 9, 1],
            vec![1, 9, 1],
            vec![1, 1, 1],
        ])
        .unwrap();
        let r = AStar::astar().solve(&grid, Point::new(0, 0), Point::new(0, 2));
        // Down, across the bottom, and back up: 1 + 1 + 1 + 1 + 1 + 1.
        assert_eq!(r.cost, 6);
        assert_eq!(path_cost(&grid, &r.path), Ok(6));
    }

    #[test]
    fn zero_cost_cells_keep_astar_optimal() {
        let grid = Grid::from_rows(vec![
            vec![1, 5, 5, 5],
            vec![0, 0, 0, 0],
            vec![5, 5, 5, 1],
        ])
        .unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(0, 3));
        let (d, a) = solvers();
        let rd = d.solve(&grid, start, goal);
        let ra = a.solve(&grid, start, goal);
        assert_eq!(rd.cost, 5);
        assert_eq!(ra.cost, rd.cost);
    }

    #[test]
    fn dijkstra_and_astar_agree_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let (d, a) = solvers();
        for _ in 0..200 {
            let rows = rng.random_range(2..12);
            let cols = rng.random_range(2..12);
            let grid = random_grid(&mut rng, rows, cols, 25);
            let start = grid.point(rng.random_range(0..grid.len()));
            let goal = grid.point(rng.random_range(0..grid.len()));
            if !grid.is_valid(start) || !grid.is_valid(goal) {
                continue;
            }
            let rd = d.solve(&grid, start, goal);
            let ra = a.solve(&grid, start, goal);
            assert_eq!(rd.status, ra.status);
            assert_eq!(rd.cost, ra.cost);
            match brute_force_cost(&grid, start, goal) {
                Some(c) => assert_eq!(rd.cost, c),
                None => assert_eq!(rd.status, SolveStatus::Failed),
            }
            if rd.is_success() && start != goal {
                assert!(ra.nodes_expanded <= rd.nodes_expanded);
                for r in [&rd, &ra] {
                    assert!(is_complete(&grid, &r.path, start, goal));
                    assert!(r.path.windows(2).all(|w| w[0] != w[1]));
                    assert_eq!(path_cost(&grid, &r.path), Ok(r.cost));
                }
            }
        }
    }

    #[test]
    fn solvers_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dijkstra>();
        assert_send_sync::<AStar>();
        assert_send_sync::<Grid>();
    }

    #[test]
    fn names() {
        let (d, a) = solvers();
        assert_eq!(d.name(), "Dijkstra");
        assert_eq!(a.name(), "A*");
    }
}
