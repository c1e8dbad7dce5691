//! Evolutionary loop execution.

use std::time::Instant;

use super::config::EaConfig;
use crate::error::Result;
use crate::eval::{Evaluator, InitKind, EPS};
use crate::net::TrafficOracle;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A weight vector with its cached objective.
#[derive(Debug, Clone)]
struct Individual {
    weights: Vec<u32>,
    objective: f64,
}

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
pub struct EaResult {
    /// Best individual ever seen.
    pub best_weights: Vec<u32>,
    /// Objective of the best individual.
    pub best_objective: f64,
    /// Generations completed.
    pub iterations: u64,
    /// Oracle calls spent.
    pub oracle_calls: u64,
    /// Wall-clock time of the run.
    pub elapsed_seconds: f64,
    /// Incumbent objective after initialization and each generation.
    pub objective_history: Vec<f64>,
    /// Mean per-link weight entropy of the population after
    /// initialization and each generation (diversity diagnostic).
    pub entropy_history: Vec<f64>,
}

/// Evolutionary driver: uniform crossover, single-link mutation, and
/// truncation selection over a population of weight vectors.
///
/// Lower objective is better everywhere; the initial incumbent is the
/// minimum of the starting population.
pub struct EaRunner;

impl EaRunner {
    /// Runs the evolutionary loop until the generation or wall-clock
    /// budget is exhausted.
    pub fn run<O: TrafficOracle>(
        evaluator: &mut Evaluator<'_, O>,
        config: &EaConfig,
    ) -> Result<EaResult> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let start = Instant::now();
        let calls_before = evaluator.oracle_calls();
        let num_links = evaluator.num_links();
        let max_weight = evaluator.max_weight();

        // Initial population, sorted best first.
        let mut population: Vec<Individual> = Vec::with_capacity(config.population_size as usize);
        for _ in 0..config.population_size {
            let (weights, eval) = evaluator.initial_solution(InitKind::Random, &mut rng)?;
            population.push(Individual {
                weights,
                objective: eval.objective,
            });
        }
        sort_by_objective(&mut population);

        let mut best_weights = population[0].weights.clone();
        let mut best_objective = population[0].objective;
        let mut objective_history = vec![best_objective];
        let mut entropy_history = vec![mean_weight_entropy(&population, num_links)];
        let mut iterations = 0u64;

        let parent_count = 2 * config.offspring_size as usize;
        let random_parents =
            (config.random_parent_fraction * parent_count as f64).round() as usize;

        for generation in 0..config.max_generations {
            if generation > 0 && out_of_time(&start, config.time_limit_ms) {
                break;
            }

            // Parent selection: a random slice of the population plus
            // the elite remainder. The population is kept sorted, so the
            // elite parents are a prefix.
            let mut parents: Vec<usize> = (0..random_parents)
                .map(|_| rng.random_range(0..population.len()))
                .collect();
            parents.extend(0..parent_count - random_parents);
            parents.shuffle(&mut rng);

            let mut children = Vec::with_capacity(config.offspring_size as usize);
            for couple in parents.chunks_exact(2) {
                let (a, b) = (&population[couple[0]], &population[couple[1]]);
                // Uniform crossover, then one-link uniform reset.
                let mut weights: Vec<u32> = (0..num_links)
                    .map(|i| {
                        if rng.random_bool(0.5) {
                            a.weights[i]
                        } else {
                            b.weights[i]
                        }
                    })
                    .collect();
                let mutated = rng.random_range(0..num_links);
                weights[mutated] = rng.random_range(1..=max_weight);

                let eval = evaluator.evaluate(&weights)?;
                children.push(Individual {
                    weights,
                    objective: eval.objective,
                });
            }

            // Truncation selection over parents + children.
            population.extend(children);
            sort_by_objective(&mut population);
            population.truncate(config.population_size as usize);

            if population[0].objective < best_objective - EPS {
                best_objective = population[0].objective;
                best_weights = population[0].weights.clone();
            }

            iterations = generation + 1;
            objective_history.push(best_objective);
            entropy_history.push(mean_weight_entropy(&population, num_links));
        }

        Ok(EaResult {
            best_weights,
            best_objective,
            iterations,
            oracle_calls: evaluator.oracle_calls() - calls_before,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            objective_history,
            entropy_history,
        })
    }
}

fn sort_by_objective(population: &mut [Individual]) {
    population.sort_by(|a, b| {
        a.objective
            .partial_cmp(&b.objective)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Mean over links of the Shannon entropy (nats) of the weight values
/// present in the population. Zero means every individual agrees on
/// every link.
fn mean_weight_entropy(population: &[Individual], num_links: usize) -> f64 {
    let n = population.len() as f64;
    let mut total = 0.0;
    for link in 0..num_links {
        let mut counts = std::collections::BTreeMap::new();
        for ind in population {
            *counts.entry(ind.weights[link]).or_insert(0u32) += 1;
        }
        let entropy: f64 = counts
            .values()
            .map(|&c| {
                let p = f64::from(c) / n;
                -p * p.ln()
            })
            .sum();
        total += entropy;
    }
    total / num_links as f64
}

fn out_of_time(start: &Instant, limit_ms: Option<u64>) -> bool {
    limit_ms.is_some_and(|ms| start.elapsed().as_millis() as u64 >= ms)
}
