//! Capped point-to-point searches with reusable buffers.
//!
//! The genetic engine issues thousands of small queries per run. Node
//! state is stamped with a generation counter, so starting a new query only
//! bumps the counter instead of clearing every array.

use std::collections::VecDeque;

use maze_core::{Grid, Point};

use crate::heap::ArrayHeap;

const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
struct Node {
    g: i64,
    parent: usize,
    generation: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
        }
    }
}

/// Bounded BFS and cheapest-path queries between two cells.
///
/// Every query gives up once it has expanded `max_expansions` cells,
/// returning `None` as if no route existed.
pub struct LocalSearch {
    nodes: Vec<Node>,
    generation: u32,
    queue: VecDeque<usize>,
    open: ArrayHeap,
    expanded: usize,
}

impl LocalSearch {
    /// Buffers sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::with_cells(grid.len())
    }

    /// Buffers sized for a grid of `cells` cells. They grow on demand if a
    /// larger grid is queried later.
    pub fn with_cells(cells: usize) -> Self {
        Self {
            nodes: vec![Node::default(); cells],
            generation: 0,
            queue: VecDeque::new(),
            open: ArrayHeap::for_cells(cells),
            expanded: 0,
        }
    }

    /// Total cells expanded by every query so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Start a new query over `grid`, returning its generation stamp.
    fn begin(&mut self, grid: &Grid) -> u32 {
        if grid.len() > self.nodes.len() {
            self.nodes.clear();
            self.nodes.resize(grid.len(), Node::default());
            self.open = ArrayHeap::for_cells(grid.len());
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with new ones.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.queue.clear();
        self.open.clear();
        self.generation
    }

    /// Fewest-steps path from `from` to `to`, both endpoints included.
    ///
    /// Ties are broken by neighbour order (up, right, down, left).
    pub fn bfs_path(
        &mut self,
        grid: &Grid,
        from: Point,
        to: Point,
        max_expansions: usize,
    ) -> Option<Vec<Point>> {
        if !grid.is_valid(from) || !grid.is_valid(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }
        let cur_gen = self.begin(grid);
        let si = grid.index(from)?;
        let gi = grid.index(to)?;

        self.nodes[si] = Node {
            g: 0,
            parent: NO_PARENT,
            generation: cur_gen,
        };
        self.queue.push_back(si);

        let mut expansions = 0usize;
        while let Some(ci) = self.queue.pop_front() {
            if expansions >= max_expansions {
                break;
            }
            expansions += 1;
            let cp = grid.point(ci);
            let next_g = self.nodes[ci].g + 1;
            for np in grid.neighbors(cp) {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                self.nodes[ni] = Node {
                    g: next_g,
                    parent: ci,
                    generation: cur_gen,
                };
                if ni == gi {
                    self.expanded += expansions;
                    return Some(self.reconstruct(grid, gi));
                }
                self.queue.push_back(ni);
            }
        }

        self.expanded += expansions;
        None
    }

    /// Cheapest path from `from` to `to` whose cost is strictly below
    /// `bound`, with both endpoints included. Returns the path and its
    /// cost by the usual convention (`from` excluded, `to` included).
    ///
    /// Partial routes that already reach `bound` are pruned, so a tight
    /// bound keeps the search small.
    pub fn cheapest_path(
        &mut self,
        grid: &Grid,
        from: Point,
        to: Point,
        max_expansions: usize,
        bound: i64,
    ) -> Option<(Vec<Point>, i64)> {
        if !grid.is_valid(from) || !grid.is_valid(to) {
            return None;
        }
        if from == to {
            return (bound > 0).then(|| (vec![from], 0));
        }
        let cur_gen = self.begin(grid);
        let si = grid.index(from)?;
        let gi = grid.index(to)?;

        self.nodes[si] = Node {
            g: 0,
            parent: NO_PARENT,
            generation: cur_gen,
        };
        self.open.push(si, 0);

        let mut expansions = 0usize;
        let found = 'search: loop {
            let Some((ci, priority)) = self.open.pop_min() else {
                break 'search false;
            };
            // Skip stale entries.
            if priority > self.nodes[ci].g {
                continue;
            }
            if ci == gi {
                break 'search true;
            }
            if expansions >= max_expansions {
                break 'search false;
            }
            expansions += 1;

            let cp = grid.point(ci);
            let current_g = self.nodes[ci].g;
            for np in grid.neighbors(cp) {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                let tentative = current_g + i64::from(grid.cost_at(ni));
                if tentative >= bound {
                    continue;
                }
                let n = &mut self.nodes[ni];
                if n.generation == cur_gen && tentative >= n.g {
                    continue;
                }
                *n = Node {
                    g: tentative,
                    parent: ci,
                    generation: cur_gen,
                };
                if !self.open.push(ni, tentative) {
                    break 'search false;
                }
            }
        };

        self.expanded += expansions;
        if !found {
            return None;
        }
        let cost = self.nodes[gi].g;
        Some((self.reconstruct(grid, gi), cost))
    }

    fn reconstruct(&self, grid: &Grid, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(grid.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}
