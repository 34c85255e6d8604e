use std::fmt;

use crate::repair::RepairConfig;

/// Tuning knobs for [`GeneticSolver`](crate::GeneticSolver).
///
/// Every field has a workable default; the `with_*` setters cover the ones
/// usually adjusted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GeneticConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Hard cap on generations.
    pub max_generations: usize,
    /// Share of each generation copied unchanged into the next.
    pub elite_fraction: f64,
    /// Contestants sampled per tournament.
    pub tournament_size: usize,
    /// Probability that a child is bred by crossover rather than copied.
    pub crossover_rate: f64,
    /// Mutation probability while the search is improving.
    pub mutation_rate: f64,
    /// Ceiling the mutation probability climbs to under stagnation.
    pub max_mutation_rate: f64,
    /// Generations without improvement before stagnation measures kick in.
    pub stagnation_threshold: usize,
    /// Generations without improvement after which a run with a complete
    /// route stops early.
    pub convergence_threshold: usize,
    /// Share of a stagnating generation replaced by fresh walks.
    pub injection_fraction: f64,
    /// Seeding walks attempted per population slot.
    pub seed_attempts: usize,
    /// Fewest seeds that must reach the goal for a run to start.
    pub min_viable_seeds: usize,
    /// Step cap for one seeding walk; 0 means eight times the cell count.
    pub walk_step_limit: usize,
    /// Probability a walk steps toward the goal instead of at random.
    pub goal_bias: f64,
    /// Expansion cap for the BFS behind one mutation.
    pub mutation_expansion_limit: usize,
    /// How far ahead path repair looks for a shortcut.
    pub repair_window: usize,
    /// Expansion cap for one shortcut search.
    pub repair_expansion_limit: usize,
    /// Cap on repair passes for one path.
    pub repair_max_passes: usize,
    /// Repair the elites every this many generations; 0 disables it.
    pub polish_interval: usize,
    /// RNG seed; `None` draws a fresh one per solve.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 60,
            max_generations: 300,
            elite_fraction: 0.1,
            tournament_size: 3,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            max_mutation_rate: 0.6,
            stagnation_threshold: 20,
            convergence_threshold: 60,
            injection_fraction: 0.2,
            seed_attempts: 5,
            min_viable_seeds: 2,
            walk_step_limit: 0,
            goal_bias: 0.7,
            mutation_expansion_limit: 400,
            repair_window: 24,
            repair_expansion_limit: 2000,
            repair_max_passes: 64,
            polish_interval: 10,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// Fix the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Set the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Set the stagnation and convergence thresholds.
    pub fn with_thresholds(mut self, stagnation: usize, convergence: usize) -> Self {
        self.stagnation_threshold = stagnation;
        self.convergence_threshold = convergence;
        self
    }

    /// Set how often elites are repaired (0 disables it).
    pub fn with_polish_interval(mut self, n: usize) -> Self {
        self.polish_interval = n;
        self
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroLimit("max_generations"));
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroLimit("tournament_size"));
        }
        if self.seed_attempts == 0 {
            return Err(ConfigError::ZeroLimit("seed_attempts"));
        }
        if self.mutation_expansion_limit == 0 {
            return Err(ConfigError::ZeroLimit("mutation_expansion_limit"));
        }
        if self.repair_max_passes == 0 {
            return Err(ConfigError::ZeroLimit("repair_max_passes"));
        }
        for (name, value) in [
            ("elite_fraction", self.elite_fraction),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
            ("max_mutation_rate", self.max_mutation_rate),
            ("injection_fraction", self.injection_fraction),
            ("goal_bias", self.goal_bias),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if self.max_mutation_rate < self.mutation_rate {
            return Err(ConfigError::RateOutOfRange {
                name: "max_mutation_rate",
                value: self.max_mutation_rate,
            });
        }
        if self.convergence_threshold < self.stagnation_threshold {
            return Err(ConfigError::Thresholds {
                stagnation: self.stagnation_threshold,
                convergence: self.convergence_threshold,
            });
        }
        if self.min_viable_seeds == 0 || self.min_viable_seeds > self.population_size {
            return Err(ConfigError::ViableSeeds {
                min_viable: self.min_viable_seeds,
                population: self.population_size,
            });
        }
        Ok(())
    }

    /// Number of elites: at least one, at most the whole population.
    pub fn elite_count(&self) -> usize {
        let n = (self.population_size as f64 * self.elite_fraction).round() as usize;
        n.clamp(1, self.population_size)
    }

    /// Walk step cap for a grid of `cells` cells.
    pub fn walk_steps_for(&self, cells: usize) -> usize {
        if self.walk_step_limit == 0 {
            cells.saturating_mul(8)
        } else {
            self.walk_step_limit
        }
    }

    /// Mutation probability after `stagnation` generations without
    /// improvement: the base rate up to the threshold, then climbing
    /// linearly to the ceiling over one more threshold's worth.
    pub fn mutation_rate_at(&self, stagnation: usize) -> f64 {
        if stagnation <= self.stagnation_threshold {
            return self.mutation_rate;
        }
        if self.stagnation_threshold == 0 {
            return self.max_mutation_rate;
        }
        let over = (stagnation - self.stagnation_threshold) as f64;
        let t = (over / self.stagnation_threshold as f64).min(1.0);
        self.mutation_rate + (self.max_mutation_rate - self.mutation_rate) * t
    }

    /// Path repair settings.
    pub fn repair(&self) -> RepairConfig {
        RepairConfig {
            window: self.repair_window,
            expansion_limit: self.repair_expansion_limit,
            max_passes: self.repair_max_passes,
        }
    }
}

/// Reasons a [`GeneticConfig`] is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fewer than two individuals.
    PopulationTooSmall(usize),
    /// A cap or count that must be positive is zero.
    ZeroLimit(&'static str),
    /// A probability or fraction outside `[0, 1]`, or a ceiling below its
    /// base rate.
    RateOutOfRange { name: &'static str, value: f64 },
    /// The convergence threshold is below the stagnation threshold.
    Thresholds { stagnation: usize, convergence: usize },
    /// The viable-seed minimum is zero or exceeds the population.
    ViableSeeds { min_viable: usize, population: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PopulationTooSmall(n) => {
                write!(f, "config: population of {n} is too small (need at least 2)")
            }
            Self::ZeroLimit(name) => write!(f, "config: {name} must be positive"),
            Self::RateOutOfRange { name, value } => {
                write!(f, "config: {name} = {value} is out of range")
            }
            Self::Thresholds {
                stagnation,
                convergence,
            } => write!(
                f,
                "config: convergence threshold {convergence} is below stagnation threshold {stagnation}"
            ),
            Self::ViableSeeds {
                min_viable,
                population,
            } => write!(
                f,
                "config: min_viable_seeds {min_viable} must be in 1..={population}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
