//! GRASP execution loop.

use std::time::Instant;

use super::config::GraspConfig;
use crate::error::Result;
use crate::eval::{Evaluator, WeightCandidate, EPS};
use crate::net::TrafficOracle;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Result of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    /// Best weight vector over all iterations.
    pub best_weights: Vec<u32>,
    /// Objective of the best weight vector.
    pub best_objective: f64,
    /// Construction + refinement iterations completed.
    pub iterations: u64,
    /// Oracle calls spent.
    pub oracle_calls: u64,
    /// Wall-clock time of the run.
    pub elapsed_seconds: f64,
    /// Incumbent objective after each iteration.
    pub objective_history: Vec<f64>,
}

/// GRASP driver: randomized-greedy construction over a restricted
/// candidate list, refined by first-fit local search each iteration.
pub struct GraspRunner;

impl GraspRunner {
    /// Runs GRASP until the iteration or wall-clock budget is exhausted.
    pub fn run<O: TrafficOracle>(
        evaluator: &mut Evaluator<'_, O>,
        config: &GraspConfig,
    ) -> Result<GraspResult> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let start = Instant::now();
        let calls_before = evaluator.oracle_calls();

        let mut best_weights: Vec<u32> = Vec::new();
        let mut best_objective = f64::INFINITY;
        let mut objective_history = Vec::new();
        let mut iterations = 0u64;

        let mut order: Vec<usize> = (0..evaluator.num_links()).collect();

        for iteration in 0..config.max_iterations {
            if iteration > 0 && out_of_time(&start, config.time_limit_ms) {
                break;
            }

            // Construction: fix links one by one in random order, each
            // time drawing uniformly from the near-best candidates.
            let (mut weights, mut current) = evaluator.initial_solution(config.init, &mut rng)?;
            order.shuffle(&mut rng);
            for &link in &order {
                let candidates =
                    evaluator.sweep_link(link, &mut weights, Some(&current), config.max_delta)?;
                if candidates.is_empty() {
                    continue;
                }
                let rcl = restricted_candidates(&candidates, config.rcl_factor);
                let pick = rcl[rng.random_range(0..rcl.len())];
                weights[link] = pick.weight;
                current = evaluator.evaluate(&weights)?;
            }

            if current.objective < best_objective - EPS || best_weights.is_empty() {
                best_weights = weights.clone();
                best_objective = current.objective;
            }

            // Refinement.
            let (refined, _) =
                evaluator.local_search(&mut weights, current, config.max_delta, true, &mut rng)?;
            if refined.objective < best_objective - EPS {
                best_weights = weights;
                best_objective = refined.objective;
            }

            iterations = iteration + 1;
            objective_history.push(best_objective);
        }

        Ok(GraspResult {
            best_weights,
            best_objective,
            iterations,
            oracle_calls: evaluator.oracle_calls() - calls_before,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            objective_history,
        })
    }
}

fn out_of_time(start: &Instant, limit_ms: Option<u64>) -> bool {
    limit_ms.is_some_and(|ms| start.elapsed().as_millis() as u64 >= ms)
}

/// Candidates whose objective lies within `rcl_factor` of the spread
/// between the best and worst sampled candidate.
fn restricted_candidates(candidates: &[WeightCandidate], rcl_factor: f64) -> Vec<WeightCandidate> {
    let best = candidates
        .iter()
        .map(|c| c.objective)
        .fold(f64::INFINITY, f64::min);
    let worst = candidates
        .iter()
        .map(|c| c.objective)
        .fold(f64::NEG_INFINITY, f64::max);
    let spread = worst - best;
    let threshold = if spread.is_finite() {
        best + rcl_factor * spread
    } else if rcl_factor > 0.0 {
        f64::INFINITY
    } else {
        best
    };
    candidates
        .iter()
        .copied()
        .filter(|c| c.objective <= threshold + EPS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::InitKind;
    use crate::fixtures::{ring, three_parallel_links};

    fn cands(objectives: &[f64]) -> Vec<WeightCandidate> {
        objectives
            .iter()
            .enumerate()
            .map(|(i, &objective)| WeightCandidate {
                weight: i as u32 + 1,
                objective,
            })
            .collect()
    }

    #[test]
    fn test_rcl_factor_zero_is_pure_greedy() {
        let rcl = restricted_candidates(&cands(&[0.5, 0.2, 0.9]), 0.0);
        assert_eq!(rcl.len(), 1);
        assert_eq!(rcl[0].weight, 2);
    }

    #[test]
    fn test_rcl_factor_one_keeps_everything() {
        let rcl = restricted_candidates(&cands(&[0.5, 0.2, 0.9]), 1.0);
        assert_eq!(rcl.len(), 3);
    }

    #[test]
    fn test_rcl_intermediate_threshold() {
        // spread 0.2..0.9; factor 0.5 -> threshold 0.55
        let rcl = restricted_candidates(&cands(&[0.5, 0.2, 0.9]), 0.5);
        let weights: Vec<u32> = rcl.iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![1, 2]);
    }

    #[test]
    fn test_rcl_handles_infinite_worst() {
        let rcl = restricted_candidates(&cands(&[0.5, f64::INFINITY]), 0.0);
        assert_eq!(rcl.len(), 1);
        assert_eq!(rcl[0].weight, 1);
        let all = restricted_candidates(&cands(&[0.5, f64::INFINITY]), 0.5);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_grasp_finds_good_solution_on_parallel_links() {
        let (topo, oracle) = three_parallel_links();
        let mut evaluator = Evaluator::new(&topo, &oracle, 1.0, 16).unwrap();
        let config = GraspConfig::default()
            .with_init(InitKind::AllOnes)
            .with_max_iterations(5)
            .with_seed(42);

        let result = GraspRunner::run(&mut evaluator, &config).unwrap();

        assert!((result.best_objective - 0.3).abs() < 1e-9);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_incumbent_history_non_increasing() {
        let (topo, oracle) = ring(5);
        let mut evaluator = Evaluator::new(&topo, &oracle, 0.9, 8).unwrap();
        let config = GraspConfig::default().with_max_iterations(8).with_seed(3);

        let result = GraspRunner::run(&mut evaluator, &config).unwrap();

        for window in result.objective_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-12,
                "incumbent worsened: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let (topo, oracle) = ring(4);
        let config = GraspConfig::default().with_max_iterations(4).with_seed(99);

        let mut e1 = Evaluator::new(&topo, &oracle, 0.9, 8).unwrap();
        let r1 = GraspRunner::run(&mut e1, &config).unwrap();
        let mut e2 = Evaluator::new(&topo, &oracle, 0.9, 8).unwrap();
        let r2 = GraspRunner::run(&mut e2, &config).unwrap();

        assert_eq!(r1.best_weights, r2.best_weights);
        assert_eq!(r1.objective_history, r2.objective_history);
    }

    #[test]
    fn test_pure_random_rcl_still_improves_via_refinement() {
        let (topo, oracle) = three_parallel_links();
        let mut evaluator = Evaluator::new(&topo, &oracle, 1.0, 16).unwrap();
        let config = GraspConfig::default()
            .with_rcl_factor(1.0)
            .with_max_iterations(5)
            .with_seed(42);

        let result = GraspRunner::run(&mut evaluator, &config).unwrap();

        assert!((result.best_objective - 0.3).abs() < 1e-9);
    }
}
