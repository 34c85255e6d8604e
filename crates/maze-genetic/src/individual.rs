use maze_core::path::path_cost;
use maze_core::{Grid, Point, manhattan};

/// Numerator of the fitness of a complete path.
pub const FITNESS_SCALE: f64 = 1_000_000.0;

/// Weight of the remaining Manhattan distance in an incomplete path's
/// penalty.
pub const DISTANCE_WEIGHT: f64 = 10.0;

/// One candidate path with its derived cost and fitness.
///
/// Scored once at construction and never modified afterwards; genetic
/// operators always build new individuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    path: Vec<Point>,
    cost: i64,
    fitness: f64,
    complete: bool,
}

impl Individual {
    /// Score `path` against `goal`.
    ///
    /// A complete path scores `FITNESS_SCALE / (cost + 1)`, which is
    /// positive and falls as cost rises. An incomplete path scores below
    /// zero, dropping with its remaining distance to the goal and the cost
    /// paid so far. A path that leaves the passable cells scores negative
    /// infinity.
    pub fn new(grid: &Grid, path: Vec<Point>, goal: Point) -> Self {
        let Ok(cost) = path_cost(grid, &path) else {
            return Self {
                path,
                cost: i64::MAX,
                fitness: f64::NEG_INFINITY,
                complete: false,
            };
        };
        let (complete, fitness) = match path.last() {
            Some(&last) if last == goal => (true, FITNESS_SCALE / (cost as f64 + 1.0)),
            Some(&last) => {
                let remaining = f64::from(manhattan(last, goal));
                (false, -(DISTANCE_WEIGHT * remaining + cost as f64) - 1.0)
            }
            None => (false, f64::NEG_INFINITY),
        };
        Self {
            path,
            cost,
            fitness,
            complete,
        }
    }

    /// The route.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Route cost (start excluded, every later cell included).
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Higher is better.
    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Whether the path ends at the goal.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether `self` strictly outranks `other`.
    #[inline]
    pub fn fitter_than(&self, other: &Individual) -> bool {
        self.fitness > other.fitness
    }

    /// Take the path out.
    pub fn into_path(self) -> Vec<Point> {
        self.path
    }
}

/// Sort by descending fitness.
pub(crate) fn sort_by_fitness(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}
