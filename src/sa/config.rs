//! SA configuration: temperature derivation, cooling, and reheating.

use crate::error::{OptError, Result};
use crate::eval::InitKind;

/// Configuration for the Simulated Annealing driver.
///
/// The initial temperature is not set directly; it is derived so that a
/// move worsening the objective by `worst_case_worsening` is accepted
/// with probability `initial_acceptance`:
/// `T0 = -worst_case_worsening / ln(initial_acceptance)`.
///
/// # Examples
///
/// ```
/// use igpwo::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_worst_case_worsening(0.25)
///     .with_cooling_factor(0.9)
///     .with_moves_per_temperature(100)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Objective worsening that the initial temperature should still
    /// accept with probability `initial_acceptance`.
    pub worst_case_worsening: f64,

    /// Acceptance probability of a `worst_case_worsening` move at the
    /// initial temperature. In `(0, 1)`.
    pub initial_acceptance: f64,

    /// Geometric cooling factor in `(0, 1)` applied after each inner loop.
    pub cooling_factor: f64,

    /// Minimum fraction of effective moves (accepted and
    /// objective-changing) per inner loop; below it the temperature is
    /// reset to its initial value instead of cooled. In `(0, 1]`.
    pub freezing_threshold: f64,

    /// Moves per inner loop (constant temperature).
    pub moves_per_temperature: u32,

    /// Neighborhood radius: a proposal moves one link's weight by at
    /// most this amount.
    pub max_delta: u32,

    /// How the starting weight vector is generated.
    pub init: InitKind,

    /// Maximum outer (temperature) iterations.
    pub max_outer_iterations: u64,

    /// Wall-clock budget in milliseconds. `None` = unbounded.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            worst_case_worsening: 0.25,
            initial_acceptance: 0.5,
            cooling_factor: 0.9,
            freezing_threshold: 0.05,
            moves_per_temperature: 100,
            max_delta: 4,
            init: InitKind::Random,
            max_outer_iterations: 200,
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_worst_case_worsening(mut self, w: f64) -> Self {
        self.worst_case_worsening = w;
        self
    }

    pub fn with_initial_acceptance(mut self, p: f64) -> Self {
        self.initial_acceptance = p;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_freezing_threshold(mut self, threshold: f64) -> Self {
        self.freezing_threshold = threshold;
        self
    }

    pub fn with_moves_per_temperature(mut self, n: u32) -> Self {
        self.moves_per_temperature = n;
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

    pub fn with_max_outer_iterations(mut self, n: u64) -> Self {
        self.max_outer_iterations = n;
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

    /// Initial (and reheat) temperature derived from the acceptance
    /// target.
    pub fn initial_temperature(&self) -> f64 {
        -self.worst_case_worsening / self.initial_acceptance.ln()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.worst_case_worsening <= 0.0 || !self.worst_case_worsening.is_finite() {
            return Err(OptError::InvalidConfig(
                "worst_case_worsening must be positive and finite".into(),
            ));
        }
        if self.initial_acceptance <= 0.0 || self.initial_acceptance >= 1.0 {
            return Err(OptError::InvalidConfig(format!(
                "initial_acceptance must be in (0, 1), got {}",
                self.initial_acceptance
            )));
        }
        if self.cooling_factor <= 0.0 || self.cooling_factor >= 1.0 {
            return Err(OptError::InvalidConfig(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if self.freezing_threshold <= 0.0 || self.freezing_threshold > 1.0 {
            return Err(OptError::InvalidConfig(format!(
                "freezing_threshold must be in (0, 1], got {}",
                self.freezing_threshold
            )));
        }
        if self.moves_per_temperature < 1 {
            return Err(OptError::InvalidConfig(
                "moves_per_temperature must be >= 1".into(),
            ));
        }
        if self.max_delta < 1 {
            return Err(OptError::InvalidConfig("max_delta must be >= 1".into()));
        }
        Ok(())
    }
}
