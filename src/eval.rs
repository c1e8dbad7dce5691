//! Objective evaluation kernel shared by every driver.
//!
//! [`Evaluator`] wraps the traffic oracle and is the only component that
//! calls it. It computes the congestion objective, generates initial
//! solutions, and enumerates single-link weight perturbations with
//! pruning. All drivers build on these operations and never touch the
//! oracle directly.

use crate::error::{OptError, Result};
use crate::net::{Topology, TrafficOracle};
use rand::seq::SliceRandom;
use rand::Rng;

/// Improvement margin: an objective must drop by more than this to count
/// as strictly improving.
pub(crate) const EPS: f64 = 1e-12;

/// How an initial weight vector is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitKind {
    /// Each link weight drawn uniformly in `[1, max_weight]`.
    #[default]
    Random,
    /// Every link weight set to 1 (pure hop-count routing).
    AllOnes,
}

/// Product of one oracle call: the scalar objective and the per-link
/// carried traffic it was computed from.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Congestion objective; lower is better.
    pub objective: f64,
    /// Carried traffic per link, in link-index order.
    pub loads: Vec<f64>,
}

/// One entry of a [`Evaluator::sweep_link`] enumeration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCandidate {
    /// The candidate weight for the swept link.
    pub weight: u32,
    /// Objective of the full vector with the swept link set to `weight`.
    pub objective: f64,
}

/// Evaluation kernel: oracle wrapper plus objective parameters.
///
/// The congestion objective is
/// `alpha * max_utilization + (1 - alpha) * mean_utilization`, where a
/// link's utilization is its carried traffic divided by its capacity
/// (zero if it carries nothing, infinite if a zero-capacity link carries
/// anything).
pub struct Evaluator<'a, O: TrafficOracle> {
    topology: &'a Topology,
    oracle: &'a O,
    alpha: f64,
    max_weight: u32,
    oracle_calls: u64,
}

impl<'a, O: TrafficOracle> Evaluator<'a, O> {
    /// Creates an evaluator. Fails with `InvalidConfig` if `alpha` is
    /// outside `[0, 1]` or `max_weight` is zero.
    pub fn new(topology: &'a Topology, oracle: &'a O, alpha: f64, max_weight: u32) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(OptError::InvalidConfig(format!(
                "alpha must be in [0, 1], got {alpha}"
            )));
        }
        if max_weight < 1 {
            return Err(OptError::InvalidConfig("max_weight must be >= 1".into()));
        }
        Ok(Self {
            topology,
            oracle,
            alpha,
            max_weight,
            oracle_calls: 0,
        })
    }

    /// Number of links in the underlying topology.
    pub fn num_links(&self) -> usize {
        self.topology.num_links()
    }

    /// Upper bound of the weight range `[1, max_weight]`.
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// Total oracle calls made through this evaluator so far.
    pub fn oracle_calls(&self) -> u64 {
        self.oracle_calls
    }

    /// Evaluates a weight vector: one oracle call, load validation, and
    /// the objective computation.
    pub fn evaluate(&mut self, weights: &[u32]) -> Result<Evaluation> {
        debug_assert_eq!(weights.len(), self.num_links());
        let loads = self.oracle.carried_traffic(weights)?;
        self.oracle_calls += 1;
        if loads.len() != self.num_links() {
            return Err(OptError::OracleFailure(format!(
                "oracle returned {} loads for {} links",
                loads.len(),
                self.num_links()
            )));
        }
        for (i, &load) in loads.iter().enumerate() {
            if !load.is_finite() || load < 0.0 {
                return Err(OptError::OracleFailure(format!(
                    "oracle returned invalid load {load} on link {i}"
                )));
            }
        }
        let objective = self.objective_of(&loads);
        Ok(Evaluation { objective, loads })
    }

    /// Objective of an already-validated load vector.
    fn objective_of(&self, loads: &[f64]) -> f64 {
        let mut max_util = 0.0f64;
        let mut sum_util = 0.0f64;
        for (i, &load) in loads.iter().enumerate() {
            let cap = self.topology.capacity(i);
            let util = if load <= 0.0 {
                0.0
            } else if cap == 0.0 {
                f64::INFINITY
            } else {
                load / cap
            };
            max_util = max_util.max(util);
            sum_util += util;
        }
        // Terms are added only when weighted, so an infinite utilization
        // under alpha = 0 or alpha = 1 cannot produce 0 * inf = NaN.
        let mut objective = 0.0;
        if self.alpha > 0.0 {
            objective += self.alpha * max_util;
        }
        if self.alpha < 1.0 {
            objective += (1.0 - self.alpha) * (sum_util / loads.len() as f64);
        }
        objective
    }

    /// Generates and evaluates an initial solution of the given kind.
    pub fn initial_solution<R: Rng>(
        &mut self,
        kind: InitKind,
        rng: &mut R,
    ) -> Result<(Vec<u32>, Evaluation)> {
        let weights = match kind {
            InitKind::Random => (0..self.num_links())
                .map(|_| rng.random_range(1..=self.max_weight))
                .collect(),
            InitKind::AllOnes => vec![1; self.num_links()],
        };
        let eval = self.evaluate(&weights)?;
        Ok((weights, eval))
    }

    /// Evaluates `weights` with `weights[link]` temporarily set to `w`,
    /// restoring the original weight on every exit path.
    fn evaluate_with(&mut self, weights: &mut [u32], link: usize, w: u32) -> Result<Evaluation> {
        let saved = weights[link];
        weights[link] = w;
        let result = self.evaluate(weights);
        weights[link] = saved;
        result
    }

    /// Enumerates single-link weight candidates for `link` in ascending
    /// order over `[max(1, cur - max_delta), min(max_weight, cur + max_delta)]`,
    /// excluding the current weight. `weights` is unchanged on return.
    ///
    /// Pruning: once a candidate leaves the link without traffic, every
    /// higher weight routes identically (shortest-path monotonicity), so
    /// the sweep stops there. `baseline`, if supplied, must be the
    /// evaluation of the current vector; when the ascending scan passes
    /// the current weight, its load is consulted instead of re-calling
    /// the oracle.
    pub fn sweep_link(
        &mut self,
        link: usize,
        weights: &mut [u32],
        baseline: Option<&Evaluation>,
        max_delta: u32,
    ) -> Result<Vec<WeightCandidate>> {
        let cur = weights[link];
        let lo = cur.saturating_sub(max_delta).max(1);
        let hi = cur.saturating_add(max_delta).min(self.max_weight);
        let mut candidates = Vec::with_capacity((hi - lo) as usize);
        for w in lo..=hi {
            if w == cur {
                if let Some(base) = baseline {
                    if base.loads[link] <= 0.0 {
                        break;
                    }
                }
                continue;
            }
            let eval = self.evaluate_with(weights, link, w)?;
            let unused = eval.loads[link] <= 0.0;
            candidates.push(WeightCandidate {
                weight: w,
                objective: eval.objective,
            });
            if unused {
                break;
            }
        }
        Ok(candidates)
    }

    /// Hill-climbs `weights` in place over the single-link neighborhood
    /// until a full pass commits no improving move.
    ///
    /// Link order is shuffled once per pass. With `first_fit` the first
    /// strictly improving candidate found is committed immediately and
    /// the pass continues; otherwise the whole pass is scanned and only
    /// its single best improving candidate is committed. Returns the
    /// final evaluation and the number of passes performed.
    pub fn local_search<R: Rng>(
        &mut self,
        weights: &mut [u32],
        eval: Evaluation,
        max_delta: u32,
        first_fit: bool,
        rng: &mut R,
    ) -> Result<(Evaluation, u64)> {
        let mut current = eval;
        let mut order: Vec<usize> = (0..self.num_links()).collect();
        let mut passes = 0u64;
        loop {
            passes += 1;
            order.shuffle(rng);
            let mut improved = false;
            if first_fit {
                for &link in &order {
                    let candidates = self.sweep_link(link, weights, Some(&current), max_delta)?;
                    if let Some(c) = candidates
                        .iter()
                        .find(|c| c.objective < current.objective - EPS)
                    {
                        weights[link] = c.weight;
                        current = self.evaluate(weights)?;
                        improved = true;
                    }
                }
            } else {
                let mut best: Option<(usize, WeightCandidate)> = None;
                for &link in &order {
                    for c in self.sweep_link(link, weights, Some(&current), max_delta)? {
                        if c.objective < current.objective - EPS
                            && best.is_none_or(|(_, b)| c.objective < b.objective)
                        {
                            best = Some((link, c));
                        }
                    }
                }
                if let Some((link, c)) = best {
                    weights[link] = c.weight;
                    current = self.evaluate(weights)?;
                    improved = true;
                }
            }
            if !improved {
                break;
            }
        }
        Ok((current, passes))
    }
}
