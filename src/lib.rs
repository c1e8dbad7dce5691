//! IGP link-weight optimization engine.
//!
//! Given a network of capacitated links and a traffic oracle that maps an
//! integer per-link weight vector to per-link carried traffic under
//! destination-based shortest-path multi-splitting (ECMP), the engine
//! searches for a weight assignment minimizing a congestion objective:
//! a configurable mix of worst-case and average link utilization.
//!
//! Six drivers share one evaluation kernel ([`Evaluator`]) and never call
//! the oracle directly:
//!
//! - **Local Search**: single-link hill climbing, first-fit or best-fit.
//! - **GRASP**: randomized-greedy construction with a restricted
//!   candidate list, refined by local search each iteration.
//! - **Simulated Annealing**: single-move Metropolis walk with geometric
//!   cooling and acceptance-driven reheating.
//! - **Tabu Search**: best-non-tabu full-range moves with aspiration and
//!   frequency-based diversification.
//! - **Ant Colony**: constructive agents guided by a per-(link, weight)
//!   pheromone matrix blended with an evaluator-derived greedy signal.
//! - **Evolutionary**: uniform crossover, single-link mutation, and
//!   truncation selection over a population of weight vectors.
//!
//! All drivers are single-threaded, stop on a wall-clock or iteration
//! budget (whichever triggers first), and are bit-reproducible for a
//! fixed seed: one explicitly threaded RNG per run, no global entropy.

pub mod aco;
pub mod ea;
mod error;
mod eval;
pub mod grasp;
pub mod local_search;
mod net;
pub mod sa;
pub mod tabu;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{OptError, Result};
pub use eval::{Evaluation, Evaluator, InitKind, WeightCandidate};
pub use net::{Topology, TrafficOracle};
