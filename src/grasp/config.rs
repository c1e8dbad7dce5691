//! GRASP configuration.

use crate::error::{OptError, Result};
use crate::eval::InitKind;

/// Configuration for the GRASP driver.
///
/// # Examples
///
/// ```
/// use igpwo::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_rcl_factor(0.3)
///     .with_max_iterations(25)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraspConfig {
    /// Restricted-candidate-list width in `[0, 1]`: 0 keeps only the
    /// greedy-best candidate per link, 1 keeps every sampled candidate.
    pub rcl_factor: f64,

    /// How each iteration's starting vector is generated.
    pub init: InitKind,

    /// Neighborhood radius used for construction sweeps and refinement.
    pub max_delta: u32,

    /// Maximum construction + refinement iterations.
    pub max_iterations: u64,

    /// Wall-clock budget in milliseconds. `None` = unbounded.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            rcl_factor: 0.3,
            init: InitKind::Random,
            max_delta: 4,
            max_iterations: 50,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl GraspConfig {
    pub fn with_rcl_factor(mut self, rcl_factor: f64) -> Self {
        self.rcl_factor = rcl_factor;
        self
    }

    pub fn with_init(mut self, init: InitKind) -> Self {
        self.init = init;
        self
    }

    pub fn with_max_delta(mut self, max_delta: u32) -> Self {
        self.max_delta = max_delta;
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

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.rcl_factor) {
            return Err(OptError::InvalidConfig(format!(
                "rcl_factor must be in [0, 1], got {}",
                self.rcl_factor
            )));
        }
        if self.max_delta < 1 {
            return Err(OptError::InvalidConfig("max_delta must be >= 1".into()));
        }
        if self.max_iterations < 1 {
            return Err(OptError::InvalidConfig(
                "max_iterations must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
