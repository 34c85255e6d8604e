//! The generational loop behind [`GeneticSolver`].

use std::time::Instant;

use maze_core::path::path_cost;
use maze_core::{Grid, Point, SolveResult, Solver};
use maze_paths::LocalSearch;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::config::{ConfigError, GeneticConfig};
use crate::individual::{Individual, sort_by_fitness};
use crate::operators::{crossover, mutate, tournament};
use crate::repair::PathRepair;
use crate::seed::{Walk, Walker};

/// Where a run stands, or how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    /// Seeding the first population.
    Init,
    /// Breeding generations.
    Evolving,
    /// The best route stopped improving for `convergence_threshold`
    /// generations.
    Converged,
    /// `max_generations` ran out.
    Exhausted,
    /// No usable population could be seeded, or the endpoints are invalid.
    Failed,
}

/// Full report of one [`GeneticSolver::evolve`] call.
#[derive(Debug, Clone)]
pub struct Evolution {
    pub result: SolveResult,
    pub state: EngineState,
    /// Generations bred after seeding.
    pub generations: usize,
    /// Best-ever cost after seeding and after each generation.
    pub best_history: Vec<i64>,
    /// RNG seed the run used.
    pub seed: u64,
}

/// Memetic route search: a genetic algorithm over complete paths, with
/// path repair polishing the elites and the final answer.
///
/// ```
/// use maze_core::{Grid, Point, Solver};
/// use maze_genetic::{GeneticConfig, GeneticSolver};
///
/// let grid = Grid::filled(4, 4, 1).unwrap();
/// let solver = GeneticSolver::new(GeneticConfig::default().with_seed(7)).unwrap();
/// let r = solver.solve(&grid, Point::new(0, 0), Point::new(3, 3));
/// assert_eq!(r.cost, 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GeneticConfig,
}

impl GeneticSolver {
    /// Build a solver, rejecting an invalid `config`.
    pub fn new(config: GeneticConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Run the engine and report how it went.
    pub fn evolve(&self, grid: &Grid, start: Point, goal: Point) -> Evolution {
        let started = Instant::now();
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let report = |result, state, generations, best_history| Evolution {
            result,
            state,
            generations,
            best_history,
            seed,
        };

        if !grid.is_valid(start) || !grid.is_valid(goal) {
            log::debug!("genetic: endpoint {start} or {goal} is not a passable cell");
            let r = SolveResult::failed(started.elapsed(), 0);
            return report(r, EngineState::Failed, 0, Vec::new());
        }
        if start == goal {
            let r = SolveResult::trivial(start, started.elapsed());
            return report(r, EngineState::Converged, 0, vec![0]);
        }

        let cfg = &self.config;
        let mut run = Run::new(grid, start, goal, cfg, seed);
        log::trace!("genetic: {:?} with seed {seed}", EngineState::Init);

        let Some(mut population) = run.seed_population() else {
            let r = SolveResult::failed(started.elapsed(), run.nodes_expanded());
            log::info!("genetic: {:?} after seeding", EngineState::Failed);
            return report(r, EngineState::Failed, 0, Vec::new());
        };
        sort_by_fitness(&mut population);
        let mut best = population[0].clone();
        let mut stagnation = 0usize;
        let mut history = vec![best.cost()];
        let mut generations = 0usize;
        log::trace!("genetic: {:?}, best seed cost {}", EngineState::Evolving, best.cost());

        let state = loop {
            if best.is_complete() && stagnation >= cfg.convergence_threshold {
                break EngineState::Converged;
            }
            if generations == cfg.max_generations {
                break EngineState::Exhausted;
            }
            population = run.next_generation(&population, generations, stagnation);
            generations += 1;
            sort_by_fitness(&mut population);
            if population[0].fitter_than(&best) {
                best = population[0].clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }
            history.push(best.cost());
            log::trace!(
                "genetic: generation {generations}, best cost {}, stagnation {stagnation}",
                best.cost()
            );
        };

        let result = run.finish(best, started);
        log::info!(
            "genetic: {state:?} after {generations} generations, cost {}, {} nodes",
            result.cost,
            result.nodes_expanded
        );
        report(result, state, generations, history)
    }
}

impl Solver for GeneticSolver {
    fn name(&self) -> &str {
        "Genetic"
    }

    fn solve(&self, grid: &Grid, start: Point, goal: Point) -> SolveResult {
        self.evolve(grid, start, goal).result
    }
}

/// Working state of one solve.
struct Run<'a> {
    grid: &'a Grid,
    start: Point,
    goal: Point,
    config: &'a GeneticConfig,
    rng: StdRng,
    local: LocalSearch,
    walker: Walker,
    repair: PathRepair,
    evaluations: usize,
}

impl<'a> Run<'a> {
    fn new(grid: &'a Grid, start: Point, goal: Point, config: &'a GeneticConfig, seed: u64) -> Self {
        Self {
            grid,
            start,
            goal,
            config,
            rng: StdRng::seed_from_u64(seed),
            local: LocalSearch::for_grid(grid),
            walker: Walker {
                step_limit: config.walk_steps_for(grid.len()),
                goal_bias: config.goal_bias,
            },
            repair: PathRepair::new(config.repair()),
            evaluations: 0,
        }
    }

    fn nodes_expanded(&self) -> usize {
        self.evaluations + self.local.expanded()
    }

    fn evaluate(&mut self, path: Vec<Point>) -> Individual {
        self.evaluations += 1;
        Individual::new(self.grid, path, self.goal)
    }

    fn walk(&mut self) -> Walk {
        self.walker.walk(self.grid, self.start, self.goal, &mut self.rng)
    }

    /// Seed a full population, or `None` when too few walks reach the goal.
    fn seed_population(&mut self) -> Option<Vec<Individual>> {
        let target = self.config.population_size;
        let attempts = target.saturating_mul(self.config.seed_attempts);
        let mut seeds = Vec::with_capacity(target);
        for _ in 0..attempts {
            if seeds.len() == target {
                break;
            }
            match self.walk() {
                Walk::Reached(path) => {
                    let ind = self.evaluate(path);
                    seeds.push(ind);
                }
                Walk::StepLimit => {}
                Walk::Exhausted => break,
            }
        }
        if seeds.len() < self.config.min_viable_seeds {
            log::warn!(
                "genetic: only {} of {} required seeds reached the goal",
                seeds.len(),
                self.config.min_viable_seeds
            );
            return None;
        }
        let viable = seeds.len();
        while seeds.len() < target {
            let twin = seeds[self.rng.random_range(0..viable)].clone();
            seeds.push(twin);
        }
        Some(seeds)
    }

    /// Breed the generation after `population`, which must be sorted.
    fn next_generation(
        &mut self,
        population: &[Individual],
        generation: usize,
        stagnation: usize,
    ) -> Vec<Individual> {
        let cfg = self.config;
        let size = cfg.population_size;
        let elites = cfg.elite_count();
        let polish = cfg.polish_interval > 0 && (generation + 1) % cfg.polish_interval == 0;
        let mut next = Vec::with_capacity(size);

        for elite in &population[..elites] {
            if polish {
                let path = self.repair.repair_with(self.grid, elite.path(), &mut self.local);
                if path != elite.path() {
                    let ind = self.evaluate(path);
                    next.push(ind);
                    continue;
                }
            }
            next.push(elite.clone());
        }

        let mutation_rate = cfg.mutation_rate_at(stagnation);
        while next.len() < size {
            let a = tournament(population, cfg.tournament_size, &mut self.rng);
            let b = tournament(population, cfg.tournament_size, &mut self.rng);
            let crossed = if self.rng.random_bool(cfg.crossover_rate) {
                crossover(a.path(), b.path(), &mut self.rng)
            } else {
                None
            };
            let mut child = crossed.unwrap_or_else(|| {
                let fitter = if b.fitter_than(a) { b } else { a };
                fitter.path().to_vec()
            });
            if self.rng.random_bool(mutation_rate) {
                if let Some(m) = mutate(
                    self.grid,
                    &child,
                    &mut self.local,
                    cfg.mutation_expansion_limit,
                    &mut self.rng,
                ) {
                    child = m;
                }
            }
            let ind = self.evaluate(child);
            next.push(ind);
        }

        if stagnation > cfg.stagnation_threshold {
            self.inject(&mut next, elites);
        }
        next
    }

    /// Replace the weakest share of `next` with fresh walks, sparing at
    /// least `protected` individuals.
    fn inject(&mut self, next: &mut [Individual], protected: usize) {
        let share = (next.len() as f64 * self.config.injection_fraction).round() as usize;
        let count = share.min(next.len().saturating_sub(protected));
        if count == 0 {
            return;
        }
        sort_by_fitness(next);
        let from = next.len() - count;
        let mut injected = 0;
        for slot in &mut next[from..] {
            if let Walk::Reached(path) = self.walk() {
                *slot = self.evaluate(path);
                injected += 1;
            }
        }
        log::trace!("genetic: injected {injected} fresh walks");
    }

    /// Polish the best-ever route and package the result.
    fn finish(mut self, best: Individual, started: Instant) -> SolveResult {
        if !best.is_complete() {
            return SolveResult::failed(started.elapsed(), self.nodes_expanded());
        }
        let polished = self.repair.repair_with(self.grid, best.path(), &mut self.local);
        let (path, cost) = match path_cost(self.grid, &polished) {
            Ok(cost) if cost <= best.cost() => (polished, cost),
            _ => {
                let cost = best.cost();
                (best.into_path(), cost)
            }
        };
        SolveResult::success(path, cost, started.elapsed(), self.nodes_expanded())
    }
}
