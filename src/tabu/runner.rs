//! Tabu Search execution engine.

use std::time::Instant;

use super::config::TabuConfig;
use super::types::{FrequencyTable, TabuList};
use crate::error::{OptError, Result};
use crate::eval::{Evaluator, EPS};
use crate::net::TrafficOracle;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best weight vector found.
    pub best_weights: Vec<u32>,
    /// Objective of the best weight vector.
    pub best_objective: f64,
    /// Iterations completed.
    pub iterations: u64,
    /// Oracle calls spent.
    pub oracle_calls: u64,
    /// Wall-clock time of the run.
    pub elapsed_seconds: f64,
    /// Incumbent objective after each iteration.
    pub objective_history: Vec<f64>,
    /// Tabu queue length after each iteration.
    pub tabu_history: Vec<usize>,
    /// Committed (link, weight) move per iteration, for diagnostics.
    pub moves: Vec<(usize, u32)>,
}

/// Tabu Search driver: best admissible full-range single-link move per
/// iteration, short-term FIFO tabu memory with aspiration, and
/// frequency-driven diversification on stagnation.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs Tabu Search until the iteration or wall-clock budget is
    /// exhausted.
    pub fn run<O: TrafficOracle>(
        evaluator: &mut Evaluator<'_, O>,
        config: &TabuConfig,
    ) -> Result<TabuResult> {
        config.validate()?;
        let num_links = evaluator.num_links();
        let max_weight = evaluator.max_weight();
        let capacity = config.capacity_for(num_links)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let start = Instant::now();
        let calls_before = evaluator.oracle_calls();

        let (mut weights, mut current) = evaluator.initial_solution(config.init, &mut rng)?;
        let mut best_weights = weights.clone();
        let mut best_objective = current.objective;

        let mut tabu = TabuList::new(capacity, num_links);
        let mut frequency = FrequencyTable::new(num_links, max_weight);

        let mut objective_history = Vec::new();
        let mut tabu_history = Vec::new();
        let mut moves = Vec::new();
        let mut no_improve = 0u64;
        let mut iterations = 0u64;

        for iteration in 0..config.max_iterations {
            if iteration > 0 && out_of_time(&start, config.time_limit_ms) {
                break;
            }

            // Full-range scan: every link, every weight in [1, max_weight].
            let mut chosen: Option<(usize, u32, f64)> = None;
            for link in 0..num_links {
                let candidates =
                    evaluator.sweep_link(link, &mut weights, Some(&current), max_weight)?;
                for c in candidates {
                    let admissible = !tabu.is_tabu(link)
                        || (config.aspiration && c.objective < best_objective - EPS);
                    if !admissible {
                        continue;
                    }
                    if chosen.is_none_or(|(_, _, o)| c.objective < o) {
                        chosen = Some((link, c.weight, c.objective));
                    }
                }
            }

            let Some((link, weight, _)) = chosen else {
                // Either every link is tabu without aspiration relief or
                // the weight range admits no move at all; both point at a
                // misconfiguration, not a recoverable state.
                return Err(OptError::InvariantViolation {
                    iteration,
                    detail: format!(
                        "no admissible move (tabu capacity {capacity}, {num_links} links, \
                         weights {weights:?})"
                    ),
                });
            };

            weights[link] = weight;
            current = evaluator.evaluate(&weights)?;
            tabu.push(link);
            frequency.record(link, weight);
            moves.push((link, weight));

            if current.objective < best_objective - EPS {
                best_objective = current.objective;
                best_weights = weights.clone();
                no_improve = 0;
            } else {
                no_improve += 1;
            }

            iterations = iteration + 1;
            objective_history.push(best_objective);
            tabu_history.push(tabu.len());

            // Diversify: restart from the incumbent and push a random
            // half of the links toward their least-visited weights.
            if no_improve >= config.max_no_improve {
                tabu.clear();
                weights.copy_from_slice(&best_weights);
                for l in 0..num_links {
                    if rng.random_bool(0.5) {
                        weights[l] = frequency.sample_rare_weight(l, &mut rng);
                    }
                }
                current = evaluator.evaluate(&weights)?;
                no_improve = 0;
            }
        }

        Ok(TabuResult {
            best_weights,
            best_objective,
            iterations,
            oracle_calls: evaluator.oracle_calls() - calls_before,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            objective_history,
            tabu_history,
            moves,
        })
    }
}

fn out_of_time(start: &Instant, limit_ms: Option<u64>) -> bool {
    limit_ms.is_some_and(|ms| start.elapsed().as_millis() as u64 >= ms)
}
