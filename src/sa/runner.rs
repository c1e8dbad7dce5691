//! SA execution loop.

use std::time::Instant;

use super::config::SaConfig;
use crate::error::{OptError, Result};
use crate::eval::{Evaluator, EPS};
use crate::net::TrafficOracle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// Best weight vector found, tracked apart from the walking state.
    pub best_weights: Vec<u32>,
    /// Objective of the best weight vector.
    pub best_objective: f64,
    /// Outer (temperature) iterations completed.
    pub iterations: u64,
    /// Oracle calls spent.
    pub oracle_calls: u64,
    /// Wall-clock time of the run.
    pub elapsed_seconds: f64,
    /// Incumbent objective after each outer iteration.
    pub objective_history: Vec<f64>,
    /// Temperature after each outer iteration (shows cooling and reheats).
    pub temperature_history: Vec<f64>,
    /// Accepted moves (including improvements).
    pub accepted_moves: u64,
    /// Strictly improving moves.
    pub improving_moves: u64,
    /// Times the temperature was reset to its initial value.
    pub reheats: u64,
}

/// Simulated Annealing driver: a single-move Metropolis walk over the
/// weight space with geometric cooling and acceptance-driven reheating.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA until the outer-iteration or wall-clock budget is
    /// exhausted.
    pub fn run<O: TrafficOracle>(
        evaluator: &mut Evaluator<'_, O>,
        config: &SaConfig,
    ) -> Result<SaResult> {
        config.validate()?;
        if evaluator.max_weight() < 2 {
            return Err(OptError::InvalidConfig(
                "simulated annealing needs max_weight >= 2 to have any neighbor".into(),
            ));
        }
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let start = Instant::now();
        let calls_before = evaluator.oracle_calls();
        let num_links = evaluator.num_links();
        let max_weight = evaluator.max_weight();

        let (mut weights, mut current) = evaluator.initial_solution(config.init, &mut rng)?;
        let mut best_weights = weights.clone();
        let mut best_objective = current.objective;

        let t0 = config.initial_temperature();
        let mut temperature = t0;
        let mut objective_history = Vec::new();
        let mut temperature_history = Vec::new();
        let mut accepted_moves = 0u64;
        let mut improving_moves = 0u64;
        let mut reheats = 0u64;
        let mut iterations = 0u64;

        for outer in 0..config.max_outer_iterations {
            if outer > 0 && out_of_time(&start, config.time_limit_ms) {
                break;
            }

            let mut ineffective = 0u32;
            for _ in 0..config.moves_per_temperature {
                let link = rng.random_range(0..num_links);
                let cur = weights[link];
                let lo = cur.saturating_sub(config.max_delta).max(1);
                let hi = cur.saturating_add(config.max_delta).min(max_weight);
                // lo < hi holds: max_weight >= 2 and max_delta >= 1.
                let proposal = loop {
                    let w = rng.random_range(lo..=hi);
                    if w != cur {
                        break w;
                    }
                };

                weights[link] = proposal;
                let candidate = evaluator.evaluate(&weights)?;
                let delta = candidate.objective - current.objective;

                let accept = if delta < 0.0 {
                    improving_moves += 1;
                    true
                } else if temperature > 0.0 {
                    rng.random_range(0.0..1.0) < (-delta / temperature).exp()
                } else {
                    false
                };

                if accept {
                    accepted_moves += 1;
                    current = candidate;
                    if current.objective < best_objective - EPS {
                        best_objective = current.objective;
                        best_weights = weights.clone();
                    }
                } else {
                    weights[link] = cur;
                }

                if !accept || delta.abs() <= EPS {
                    ineffective += 1;
                }
            }

            // Reheat when the walk has effectively frozen at this
            // temperature, otherwise cool geometrically.
            let effective =
                1.0 - f64::from(ineffective) / f64::from(config.moves_per_temperature);
            if effective < config.freezing_threshold {
                temperature = t0;
                reheats += 1;
            } else {
                temperature *= config.cooling_factor;
            }

            iterations = outer + 1;
            objective_history.push(best_objective);
            temperature_history.push(temperature);
        }

        Ok(SaResult {
            best_weights,
            best_objective,
            iterations,
            oracle_calls: evaluator.oracle_calls() - calls_before,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            objective_history,
            temperature_history,
            accepted_moves,
            improving_moves,
            reheats,
        })
    }
}

fn out_of_time(start: &Instant, limit_ms: Option<u64>) -> bool {
    limit_ms.is_some_and(|ms| start.elapsed().as_millis() as u64 >= ms)
}
