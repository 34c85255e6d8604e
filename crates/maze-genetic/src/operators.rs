//! Genetic operators on paths: tournament selection, crossover, mutation.

use std::collections::HashMap;

use maze_core::path::{path_cost, remove_loops, splice};
use maze_core::{Grid, Point};
use maze_paths::LocalSearch;
use rand::{Rng, RngExt};

use crate::individual::Individual;

/// Sample `k` individuals uniformly (with replacement) and return the
/// fittest. `population` must not be empty.
pub fn tournament<'a>(population: &'a [Individual], k: usize, rng: &mut impl Rng) -> &'a Individual {
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..k.max(1) {
        let c = &population[rng.random_range(0..population.len())];
        if c.fitter_than(best) {
            best = c;
        }
    }
    best
}

/// Splice `a`'s prefix onto `b`'s suffix at a shared cell.
///
/// The splice point is drawn uniformly from the cells both paths visit,
/// endpoints excluded. Returns `None` when there is no such cell. Any cycle
/// the splice creates is cut, so the child is a loop-free path from `a`'s
/// first point to `b`'s last.
pub fn crossover(a: &[Point], b: &[Point], rng: &mut impl Rng) -> Option<Vec<Point>> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }
    let mut in_b: HashMap<Point, usize> = HashMap::with_capacity(b.len());
    for (j, &p) in b.iter().enumerate().take(b.len() - 1).skip(1) {
        in_b.entry(p).or_insert(j);
    }
    let shared: Vec<(usize, usize)> = a
        .iter()
        .enumerate()
        .take(a.len() - 1)
        .skip(1)
        .filter_map(|(i, p)| in_b.get(p).map(|&j| (i, j)))
        .collect();
    if shared.is_empty() {
        return None;
    }
    let (i, j) = shared[rng.random_range(0..shared.len())];
    let mut child = Vec::with_capacity(i + 1 + b.len() - j);
    child.extend_from_slice(&a[..=i]);
    child.extend_from_slice(&b[j + 1..]);
    Some(remove_loops(&child))
}

/// Replace a random segment of `path` with a capped BFS route between its
/// ends.
///
/// The replacement is kept only if it costs no more than the segment it
/// replaces and actually changes the path; otherwise `None`.
pub fn mutate(
    grid: &Grid,
    path: &[Point],
    local: &mut LocalSearch,
    max_expansions: usize,
    rng: &mut impl Rng,
) -> Option<Vec<Point>> {
    if path.len() < 3 {
        return None;
    }
    let i = rng.random_range(0..path.len() - 2);
    let j = rng.random_range(i + 2..path.len());
    let detour = local.bfs_path(grid, path[i], path[j], max_expansions)?;
    if detour == path[i..=j] {
        return None;
    }
    let old = path_cost(grid, &path[i..=j]).ok()?;
    let new = path_cost(grid, &detour).ok()?;
    if new > old {
        return None;
    }
    let out = remove_loops(&splice(path, i, j, &detour));
    (out != path).then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{Walk, Walker};
    use maze_core::path::{is_complete, is_valid_path};
    use maze_core::WALL;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn tournament_prefers_fitter() {
        let g = Grid::filled(1, 5, 1).unwrap();
        let goal = Point::new(0, 4);
        let pop = vec![
            Individual::new(&g, pts(&[(0, 0)]), goal),
            Individual::new(&g, pts(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]), goal),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        // 64 draws from two contestants all but guarantee the fitter one
        // takes part.
        let mut wins = 0;
        for _ in 0..200 {
            if tournament(&pop, 64, &mut rng).is_complete() {
                wins += 1;
            }
        }
        assert_eq!(wins, 200);
    }

    #[test]
    fn crossover_splices_at_shared_cell() {
        let a = pts(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]);
        let b = pts(&[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]);
        let mut rng = StdRng::seed_from_u64(5);
        let child = crossover(&a, &b, &mut rng).unwrap();
        assert_eq!(child, pts(&[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]));
    }

    #[test]
    fn crossover_without_shared_cells() {
        let a = pts(&[(0, 0), (0, 1), (1, 1)]);
        let b = pts(&[(0, 0), (1, 0), (1, 1)]);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(crossover(&a, &b, &mut rng).is_none());
        assert!(crossover(&a[..2], &b, &mut rng).is_none());
    }

    #[test]
    fn crossover_of_random_walks_stays_adjacent() {
        let mut rng = StdRng::seed_from_u64(0xc0ffee);
        let mut checked = 0;
        for round in 0..60 {
            let rows = rng.random_range(4..10);
            let cols = rng.random_range(4..10);
            let cells = (0..rows * cols)
                .map(|_| {
                    if rng.random_range(0..100) < 20 {
                        WALL
                    } else {
                        rng.random_range(1..6)
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
                goal_bias: (round % 4) as f64 / 4.0,
            };
            let Walk::Reached(a) = walker.walk(&grid, start, goal, &mut rng) else {
                continue;
            };
            let Walk::Reached(b) = walker.walk(&grid, start, goal, &mut rng) else {
                continue;
            };
            for _ in 0..5 {
                if let Some(child) = crossover(&a, &b, &mut rng) {
                    assert!(is_complete(&grid, &child, start, goal));
                    assert!(child.windows(2).all(|w| w[0].is_adjacent(w[1])));
                    checked += 1;
                }
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn mutation_never_raises_cost() {
        let grid = Grid::from_rows(vec![
            vec![1, 1, 1, 1],
            vec![1, 9, 9, 1],
            vec![1, 1, 1, 1],
        ])
        .unwrap();
        // A detour through the expensive middle row.
        let path = pts(&[(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (0, 3)]);
        let before = path_cost(&grid, &path).unwrap();
        let mut local = LocalSearch::for_grid(&grid);
        let mut rng = StdRng::seed_from_u64(21);
        let mut improved = false;
        for _ in 0..100 {
            if let Some(m) = mutate(&grid, &path, &mut local, 100, &mut rng) {
                assert!(is_valid_path(&grid, &m));
                assert_eq!(m.first(), path.first());
                assert_eq!(m.last(), path.last());
                let after = path_cost(&grid, &m).unwrap();
                assert!(after <= before);
                improved |= after < before;
            }
        }
        assert!(improved);
    }

    #[test]
    fn mutation_needs_three_points() {
        let grid = Grid::filled(1, 2, 1).unwrap();
        let mut local = LocalSearch::for_grid(&grid);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(mutate(&grid, &pts(&[(0, 0), (0, 1)]), &mut local, 10, &mut rng).is_none());
    }
}
