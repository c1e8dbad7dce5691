//! Ant colony configuration.

use crate::error::{OptError, Result};
use crate::eval::InitKind;

/// Configuration for the ant colony driver.
///
/// # Examples
///
/// ```
/// use igpwo::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(10)
///     .with_evaporation_rate(0.1)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants per generation.
    pub num_ants: u32,

    /// Fraction of the colony (best first) that deposits pheromone each
    /// generation. In `(0, 1]`.
    pub elite_fraction: f64,

    /// Per-generation pheromone decay in `(0, 1)`.
    pub evaporation_rate: f64,

    /// Blend between pheromone (1) and the evaluator-derived greedy
    /// signal (0) when sampling a weight. In `[0, 1]`; the greedy signal
    /// is only computed below 1.
    pub importance_factor: f64,

    /// Neighborhood radius for the greedy-signal sweeps.
    pub max_delta: u32,

    /// How each ant's starting vector is generated.
    pub init: InitKind,

    /// Maximum generations.
    pub max_generations: u64,

    /// Wall-clock budget in milliseconds. `None` = unbounded.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            elite_fraction: 0.3,
            evaporation_rate: 0.1,
            importance_factor: 0.5,
            max_delta: 4,
            init: InitKind::Random,
            max_generations: 50,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_num_ants(mut self, n: u32) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_importance_factor(mut self, factor: f64) -> Self {
        self.importance_factor = factor;
        self
    }

    pub fn with_max_delta(mut self, max_delta: u32) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn with_init(mut self, init: InitKind) -> Self {
        self.init = init;
        self
    }

    pub fn with_max_generations(mut self, n: u64) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_ants < 1 {
            return Err(OptError::InvalidConfig("num_ants must be >= 1".into()));
        }
        if self.elite_fraction <= 0.0 || self.elite_fraction > 1.0 {
            return Err(OptError::InvalidConfig(format!(
                "elite_fraction must be in (0, 1], got {}",
                self.elite_fraction
            )));
        }
        if self.evaporation_rate <= 0.0 || self.evaporation_rate >= 1.0 {
            return Err(OptError::InvalidConfig(format!(
                "evaporation_rate must be in (0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.importance_factor) {
            return Err(OptError::InvalidConfig(format!(
                "importance_factor must be in [0, 1], got {}",
                self.importance_factor
            )));
        }
        if self.max_delta < 1 {
            return Err(OptError::InvalidConfig("max_delta must be >= 1".into()));
        }
        if self.max_generations < 1 {
            return Err(OptError::InvalidConfig(
                "max_generations must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
