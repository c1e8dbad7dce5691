//! Evolutionary algorithm configuration.

use crate::error::{OptError, Result};

/// Configuration for the evolutionary driver.
///
/// # Examples
///
/// ```
/// use igpwo::ea::EaConfig;
///
/// let config = EaConfig::default()
///     .with_population_size(40)
///     .with_offspring_size(10)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaConfig {
    /// Individuals kept after truncation selection.
    pub population_size: u32,

    /// Children produced per generation. Needs `2 * offspring_size`
    /// parents, so it may not exceed half the population.
    pub offspring_size: u32,

    /// Fraction of parents drawn uniformly at random; the rest are the
    /// lowest-objective individuals. In `[0, 1]`.
    pub random_parent_fraction: f64,

    /// Maximum generations.
    pub max_generations: u64,

    /// Wall-clock budget in milliseconds. `None` = unbounded.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            offspring_size: 10,
            random_parent_fraction: 0.5,
            max_generations: 100,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl EaConfig {
    pub fn with_population_size(mut self, n: u32) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_offspring_size(mut self, n: u32) -> Self {
        self.offspring_size = n;
        self
    }

    pub fn with_random_parent_fraction(mut self, fraction: f64) -> Self {
        self.random_parent_fraction = fraction;
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
        if self.population_size < 2 {
            return Err(OptError::InvalidConfig(
                "population_size must be >= 2".into(),
            ));
        }
        if self.offspring_size < 1 {
            return Err(OptError::InvalidConfig("offspring_size must be >= 1".into()));
        }
        if 2 * self.offspring_size > self.population_size {
            return Err(OptError::InvalidConfig(format!(
                "offspring_size {} needs {} parents but the population holds only {}",
                self.offspring_size,
                2 * self.offspring_size,
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.random_parent_fraction) {
            return Err(OptError::InvalidConfig(format!(
                "random_parent_fraction must be in [0, 1], got {}",
                self.random_parent_fraction
            )));
        }
        Ok(())
    }
}
