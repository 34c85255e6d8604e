//! Memetic route search for weighted mazes.
//!
//! [`GeneticSolver`] evolves a population of complete start-to-goal paths:
//!
//! 1. **Seeding**: goal-biased randomized depth-first walks ([`Walker`]).
//! 2. **Selection**: tournaments over a population sorted by fitness, with
//!    an elite carried over unchanged.
//! 3. **Crossover**: splice one parent's prefix onto the other's suffix at
//!    a shared cell ([`operators::crossover`]).
//! 4. **Mutation**: replace a random segment with a capped BFS detour, but
//!    only when that does not raise the segment's cost
//!    ([`operators::mutate`]).
//! 5. **Repair**: shortcut and loop-removal passes ([`PathRepair`]) polish
//!    the elites periodically and the final answer.
//!
//! Stagnation raises the mutation rate and injects fresh walks; the run
//! stops at the generation cap or once the best route has stopped improving
//! for long enough.

mod config;
mod engine;
mod individual;
pub mod operators;
mod repair;
mod seed;

pub use config::{ConfigError, GeneticConfig};
pub use engine::{EngineState, Evolution, GeneticSolver};
pub use individual::{DISTANCE_WEIGHT, FITNESS_SCALE, Individual};
pub use repair::{PathRepair, RepairConfig};
pub use seed::{Walk, Walker};
