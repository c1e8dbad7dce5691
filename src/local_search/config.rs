//! Local search configuration.

use crate::error::{OptError, Result};
use crate::eval::InitKind;

/// Configuration for the local search driver.
///
/// # Examples
///
/// ```
/// use igpwo::local_search::LocalSearchConfig;
/// use igpwo::InitKind;
///
/// let config = LocalSearchConfig::default()
///     .with_init(InitKind::AllOnes)
///     .with_max_delta(4)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// How the starting weight vector is generated.
    pub init: InitKind,

    /// Commit the first improving candidate per link scan instead of the
    /// best candidate of a whole pass.
    pub first_fit: bool,

    /// Neighborhood radius: a move changes one link's weight by at most
    /// this amount.
    pub max_delta: u32,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            init: InitKind::Random,
            first_fit: true,
            max_delta: 4,
            seed: None,
        }
    }
}

impl LocalSearchConfig {
    pub fn with_init(mut self, init: InitKind) -> Self {
        self.init = init;
        self
    }

    pub fn with_first_fit(mut self, first_fit: bool) -> Self {
        self.first_fit = first_fit;
        self
    }

    pub fn with_max_delta(mut self, max_delta: u32) -> Self {
        self.max_delta = max_delta;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_delta < 1 {
            return Err(OptError::InvalidConfig("max_delta must be >= 1".into()));
        }
        Ok(())
    }
}
