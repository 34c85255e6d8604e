//! The [`Grid`] type: an immutable 2D array of traversal costs.
//!
//! Cells are stored row-major in a single buffer. A cell holding [`WALL`]
//! is impassable; every other cell holds a non-negative cost that is paid
//! when a path enters it. Once built, a grid is never mutated, so it can be
//! shared by reference across any number of concurrent solves.

use crate::error::GridError;
use crate::geom::Point;

/// Sentinel cost marking an impassable cell.
pub const WALL: i32 = -1;

/// An immutable, rectangular cost grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<i32>,
    rows: usize,
    cols: usize,
    min_cost: i32,
}

impl Grid {
    /// Build a grid from a row-major cell buffer.
    ///
    /// Fails if the buffer length does not match `rows * cols`, if the grid
    /// is empty, or if a non-wall cell has a negative cost.
    pub fn new(rows: usize, cols: usize, cells: Vec<i32>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != rows * cols {
            return Err(GridError::SizeMismatch {
                expected: rows * cols,
                found: cells.len(),
            });
        }
        let mut min_cost = i32::MAX;
        for (i, &c) in cells.iter().enumerate() {
            if c == WALL {
                continue;
            }
            if c < 0 {
                return Err(GridError::NegativeCost {
                    point: Point::new((i / cols) as i32, (i % cols) as i32),
                    cost: c,
                });
            }
            min_cost = min_cost.min(c);
        }
        if min_cost == i32::MAX {
            // All walls: no passable cell, nothing to scale.
            min_cost = 0;
        }
        Ok(Self {
            cells,
            rows,
            cols,
            min_cost,
        })
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        Self::new(rows.len(), expected, cells)
    }

    /// A grid where every cell costs `cost`.
    pub fn filled(rows: usize, cols: usize, cost: i32) -> Result<Self, GridError> {
        Self::new(rows, cols, vec![cost; rows * cols])
    }

    /// Return a copy of this grid with the given cells turned into walls.
    ///
    /// Fails on the first point outside the grid.
    pub fn with_walls(
        mut self,
        walls: impl IntoIterator<Item = Point>,
    ) -> Result<Self, GridError> {
        for p in walls {
            let i = self.index(p).ok_or(GridError::OutOfBounds(p))?;
            self.cells[i] = WALL;
        }
        Self::new(self.rows, self.cols, self.cells)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (walls included).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest cost of any passable cell (0 if there is none).
    #[inline]
    pub fn min_cost(&self) -> i32 {
        self.min_cost
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.rows && (p.col as usize) < self.cols
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_valid(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.cells[i] != WALL)
    }

    /// Whether `p` is inside the grid and a wall.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.cells[i] == WALL)
    }

    /// Cost of the cell at `p` ([`WALL`] for walls).
    pub fn cost_of(&self, p: Point) -> Result<i32, GridError> {
        self.index(p)
            .map(|i| self.cells[i])
            .ok_or(GridError::OutOfBounds(p))
    }

    /// Cost of the cell at flat index `idx`. The index must come from
    /// [`index`](Self::index).
    #[inline]
    pub fn cost_at(&self, idx: usize) -> i32 {
        self.cells[idx]
    }

    /// Flat index `row * cols + col`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.row as usize * self.cols + p.col as usize)
        } else {
            None
        }
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Passable orthogonal neighbours of `p` in up/right/down/left order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.is_valid(n))
    }

    /// Row-major copy of the cells as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.cols).map(<[i32]>::to_vec).collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<i32>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![vec![1, 2, 3], vec![4, WALL, 6]]).unwrap()
    }

    #[test]
    fn from_rows_and_costs() {
        let g = sample();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.cost_of(Point::new(0, 2)), Ok(3));
        assert_eq!(g.cost_of(Point::new(1, 1)), Ok(WALL));
        assert_eq!(g.min_cost(), 1);
    }

    #[test]
    fn cost_of_out_of_bounds() {
        let g = sample();
        let p = Point::new(2, 0);
        assert_eq!(g.cost_of(p), Err(GridError::OutOfBounds(p)));
        assert_eq!(
            g.cost_of(Point::new(0, -1)),
            Err(GridError::OutOfBounds(Point::new(0, -1)))
        );
    }

    #[test]
    fn validity_checks_bounds_and_walls() {
        let g = sample();
        assert!(g.is_valid(Point::new(0, 0)));
        assert!(!g.is_valid(Point::new(1, 1)));
        assert!(g.is_wall(Point::new(1, 1)));
        assert!(!g.is_valid(Point::new(-1, 0)));
        assert!(!g.is_wall(Point::new(5, 5)));
    }

    #[test]
    fn index_and_point_agree() {
        let g = sample();
        for i in 0..g.len() {
            assert_eq!(g.index(g.point(i)), Some(i));
        }
        assert_eq!(g.index(Point::new(1, 2)), Some(5));
        assert_eq!(g.index(Point::new(0, 3)), None);
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let g = sample();
        let ns: Vec<Point> = g.neighbors(Point::new(0, 1)).collect();
        // up is outside, down is the wall.
        assert_eq!(ns, vec![Point::new(0, 2), Point::new(0, 0)]);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Grid::from_rows(vec![vec![1, 1], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_negative_and_empty() {
        assert_eq!(
            Grid::from_rows(vec![vec![1, -3]]).unwrap_err(),
            GridError::NegativeCost {
                point: Point::new(0, 1),
                cost: -3
            }
        );
        assert_eq!(Grid::from_rows(vec![]).unwrap_err(), GridError::Empty);
        assert!(matches!(
            Grid::new(2, 2, vec![1; 3]),
            Err(GridError::SizeMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn with_walls_marks_cells() {
        let g = Grid::filled(3, 3, 1)
            .unwrap()
            .with_walls([Point::new(1, 1)])
            .unwrap();
        assert!(g.is_wall(Point::new(1, 1)));
        assert_eq!(g.to_rows()[1], vec![1, WALL, 1]);
        assert!(Grid::filled(1, 1, 1).unwrap().with_walls([Point::new(4, 4)]).is_err());
    }

    #[test]
    fn zero_cost_cells_lower_min_cost() {
        let g = Grid::from_rows(vec![vec![0, 5], vec![WALL, 2]]).unwrap();
        assert_eq!(g.min_cost(), 0);
        let walls = Grid::from_rows(vec![vec![WALL]]).unwrap();
        assert_eq!(walls.min_cost(), 0);
    }
}
