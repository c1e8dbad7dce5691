//! Ant colony execution loop.

use std::time::Instant;

use super::config::AcoConfig;
use super::types::Pheromone;
use crate::error::Result;
use crate::eval::{Evaluator, EPS};
use crate::net::TrafficOracle;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Result of an ant colony run.
#[derive(Debug, Clone)]
pub struct AcoResult {
    /// Best weight vector over all ants and generations.
    pub best_weights: Vec<u32>,
    /// Objective of the best weight vector.
    pub best_objective: f64,
    /// Generations completed.
    pub iterations: u64,
    /// Oracle calls spent.
    pub oracle_calls: u64,
    /// Wall-clock time of the run.
    pub elapsed_seconds: f64,
    /// Incumbent objective after each generation.
    pub objective_history: Vec<f64>,
}

/// Ant colony driver: constructive agents sample each link's weight
/// from a pheromone distribution blended with a greedy signal derived
/// from the evaluator; elite ants reinforce, everything evaporates.
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony until the generation or wall-clock budget is
    /// exhausted.
    pub fn run<O: TrafficOracle>(
        evaluator: &mut Evaluator<'_, O>,
        config: &AcoConfig,
    ) -> Result<AcoResult> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let start = Instant::now();
        let calls_before = evaluator.oracle_calls();
        let num_links = evaluator.num_links();
        let max_weight = evaluator.max_weight();

        let mut pheromone = Pheromone::new(num_links, max_weight);
        let mut best_weights: Vec<u32> = Vec::new();
        let mut best_objective = f64::INFINITY;
        let mut objective_history = Vec::new();
        let mut iterations = 0u64;

        let mut order: Vec<usize> = (0..num_links).collect();
        let elite_count = ((config.elite_fraction * f64::from(config.num_ants)).ceil() as usize)
            .clamp(1, config.num_ants as usize);

        for generation in 0..config.max_generations {
            if generation > 0 && out_of_time(&start, config.time_limit_ms) {
                break;
            }

            let mut ants: Vec<(Vec<u32>, f64)> = Vec::with_capacity(config.num_ants as usize);
            for _ in 0..config.num_ants {
                order.shuffle(&mut rng);
                let ant = construct_ant(evaluator, config, &pheromone, &order, &mut rng)?;
                if ant.1 < best_objective - EPS || best_weights.is_empty() {
                    best_weights = ant.0.clone();
                    best_objective = ant.1;
                }
                ants.push(ant);
            }

            // Elite reinforcement, then global evaporation.
            ants.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            for (weights, objective) in ants.iter().take(elite_count) {
                let deposit = 1.0 / objective.max(EPS);
                for (link, &w) in weights.iter().enumerate() {
                    pheromone.reinforce(link, w, deposit);
                }
            }
            pheromone.evaporate(config.evaporation_rate);

            iterations = generation + 1;
            objective_history.push(best_objective);
        }

        Ok(AcoResult {
            best_weights,
            best_objective,
            iterations,
            oracle_calls: evaluator.oracle_calls() - calls_before,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            objective_history,
        })
    }
}

/// One ant: start from a fresh initial vector and re-sample every link's
/// weight, in the given order, from pheromone blended with the greedy
/// signal.
fn construct_ant<O: TrafficOracle, R: Rng>(
    evaluator: &mut Evaluator<'_, O>,
    config: &AcoConfig,
    pheromone: &Pheromone,
    order: &[usize],
    rng: &mut R,
) -> Result<(Vec<u32>, f64)> {
    let max_weight = evaluator.max_weight();
    let (mut weights, mut current) = evaluator.initial_solution(config.init, rng)?;

    for &link in order {
        let mut scores: Vec<f64> = (1..=max_weight)
            .map(|w| pheromone.level(link, w) * config.importance_factor)
            .collect();

        if config.importance_factor < 1.0 {
            let greedy_share = 1.0 - config.importance_factor;
            let candidates =
                evaluator.sweep_link(link, &mut weights, Some(&current), config.max_delta)?;
            for c in &candidates {
                // 1/inf is 0: an overloading weight gets no greedy mass.
                scores[(c.weight - 1) as usize] += greedy_share / c.objective.max(EPS);
            }
            let cur = weights[link];
            scores[(cur - 1) as usize] += greedy_share / current.objective.max(EPS);
        }

        let w = sample_weight(&scores, rng);
        if w != weights[link] {
            weights[link] = w;
            current = evaluator.evaluate(&weights)?;
        }
    }

    Ok((weights, current.objective))
}

/// Draws a 1-based weight proportionally to `scores`; degenerate score
/// vectors (all zero or non-finite) fall back to a uniform draw.
fn sample_weight<R: Rng>(scores: &[f64], rng: &mut R) -> u32 {
    let total: f64 = scores.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(1..=scores.len() as u32);
    }
    let mut target = rng.random_range(0.0..total);
    for (i, &score) in scores.iter().enumerate() {
        target -= score;
        if target < 0.0 {
            return (i + 1) as u32;
        }
    }
    scores.len() as u32
}

fn out_of_time(start: &Instant, limit_ms: Option<u64>) -> bool {
    limit_ms.is_some_and(|ms| start.elapsed().as_millis() as u64 >= ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::InitKind;
    use crate::fixtures::{ring, three_parallel_links};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_weight_respects_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        // All mass on weight 3.
        for _ in 0..20 {
            assert_eq!(sample_weight(&[0.0, 0.0, 5.0, 0.0], &mut rng), 3);
        }
    }

    #[test]
    fn test_sample_weight_degenerate_falls_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let w = sample_weight(&[0.0, 0.0, 0.0], &mut rng);
        assert!((1..=3).contains(&w));
        let w = sample_weight(&[f64::INFINITY, 1.0], &mut rng);
        assert!((1..=2).contains(&w));
    }

    #[test]
    fn test_colony_improves_on_parallel_links() {
        let (topo, oracle) = three_parallel_links();
        let mut evaluator = Evaluator::new(&topo, &oracle, 1.0, 8).unwrap();
        let config = AcoConfig::default()
            .with_num_ants(6)
            .with_max_generations(10)
            .with_init(InitKind::AllOnes)
            .with_seed(42);

        let result = AcoRunner::run(&mut evaluator, &config).unwrap();

        assert!(
            (result.best_objective - 0.3).abs() < 1e-9,
            "expected the tiny link priced out, got {}",
            result.best_objective
        );
        assert_eq!(result.iterations, 10);
    }

    #[test]
    fn test_incumbent_history_non_increasing() {
        let (topo, oracle) = ring(4);
        let mut evaluator = Evaluator::new(&topo, &oracle, 0.9, 6).unwrap();
        let config = AcoConfig::default()
            .with_num_ants(4)
            .with_max_generations(8)
            .with_seed(5);

        let result = AcoRunner::run(&mut evaluator, &config).unwrap();

        for window in result.objective_history.windows(2) {
            assert!(window[1] <= window[0] + 1e-12);
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let (topo, oracle) = ring(4);
        let config = AcoConfig::default()
            .with_num_ants(4)
            .with_max_generations(5)
            .with_seed(17);

        let mut e1 = Evaluator::new(&topo, &oracle, 0.9, 6).unwrap();
        let r1 = AcoRunner::run(&mut e1, &config).unwrap();
        let mut e2 = Evaluator::new(&topo, &oracle, 0.9, 6).unwrap();
        let r2 = AcoRunner::run(&mut e2, &config).unwrap();

        assert_eq!(r1.best_weights, r2.best_weights);
        assert_eq!(r1.objective_history, r2.objective_history);
        assert_eq!(r1.oracle_calls, r2.oracle_calls);
    }

    #[test]
    fn test_pure_pheromone_skips_greedy_sweeps() {
        let (topo, oracle) = ring(4);
        let mut evaluator = Evaluator::new(&topo, &oracle, 0.9, 6).unwrap();
        let config = AcoConfig::default()
            .with_importance_factor(1.0)
            .with_num_ants(3)
            .with_max_generations(3)
            .with_seed(2);

        let result = AcoRunner::run(&mut evaluator, &config).unwrap();

        // Without the greedy signal, each ant spends one oracle call per
        // initial solution plus at most one per re-sampled link.
        let per_ant_max = 1 + evaluator.num_links() as u64;
        assert!(result.oracle_calls <= 3 * 3 * per_ant_max);
    }
}
