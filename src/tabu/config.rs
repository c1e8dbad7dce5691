//! Tabu Search configuration.

use crate::error::{OptError, Result};
use crate::eval::InitKind;

/// Configuration for the Tabu Search driver.
///
/// # Examples
///
/// ```
/// use igpwo::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_list_fraction(0.5)
///     .with_max_iterations(100)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Tabu list capacity as a fraction of the link count, in `(0, 1)`.
    /// The resulting capacity (at least 1) must stay below the link
    /// count or every move could become tabu at once.
    pub list_fraction: f64,

    /// Allow a tabu move when it strictly improves the best-ever
    /// incumbent.
    pub aspiration: bool,

    /// Stagnant iterations before diversification kicks in.
    pub max_no_improve: u64,

    /// How the starting weight vector is generated.
    pub init: InitKind,

    /// Maximum iterations.
    pub max_iterations: u64,

    /// Wall-clock budget in milliseconds. `None` = unbounded.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            list_fraction: 0.5,
            aspiration: true,
            max_no_improve: 30,
            init: InitKind::Random,
            max_iterations: 200,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl TabuConfig {
    pub fn with_list_fraction(mut self, fraction: f64) -> Self {
        self.list_fraction = fraction;
        self
    }

    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_max_no_improve(mut self, n: u64) -> Self {
        self.max_no_improve = n;
        self
    }

    pub fn with_init(mut self, init: InitKind) -> Self {
        self.init = init;
        self
    }

    pub fn with_max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
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

    /// Tabu list capacity for a topology with `num_links` links.
    /// Fails with `InvalidConfig` when the capacity would cover every
    /// link, which leaves no admissible move once the list fills.
    pub fn capacity_for(&self, num_links: usize) -> Result<usize> {
        let capacity = ((self.list_fraction * num_links as f64).round() as usize).max(1);
        if capacity >= num_links {
            return Err(OptError::InvalidConfig(format!(
                "tabu list capacity {capacity} must be below the link count {num_links}"
            )));
        }
        Ok(capacity)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.list_fraction <= 0.0 || self.list_fraction >= 1.0 {
            return Err(OptError::InvalidConfig(format!(
                "list_fraction must be in (0, 1), got {}",
                self.list_fraction
            )));
        }
        if self.max_no_improve < 1 {
            return Err(OptError::InvalidConfig(
                "max_no_improve must be >= 1".into(),
            ));
        }
        if self.max_iterations < 1 {
            return Err(OptError::InvalidConfig(
                "max_iterations must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
