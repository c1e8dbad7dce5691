//! Network topology and the traffic-assignment oracle contract.

use crate::error::{OptError, Result};

/// Immutable link-level view of a network.
///
/// The engine only needs link indices and capacities; shortest-path
/// computation and demand routing live behind [`TrafficOracle`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    capacities: Vec<f64>,
}

impl Topology {
    /// Builds a topology from per-link capacities.
    ///
    /// Capacities must be finite and non-negative. A capacity of zero is
    /// legal and marks a link that must carry no traffic.
    pub fn new(capacities: Vec<f64>) -> Result<Self> {
        if capacities.is_empty() {
            return Err(OptError::InvalidConfig(
                "topology must have at least one link".into(),
            ));
        }
        for (i, &c) in capacities.iter().enumerate() {
            if !c.is_finite() || c < 0.0 {
                return Err(OptError::InvalidConfig(format!(
                    "link {i} has invalid capacity {c}"
                )));
            }
        }
        Ok(Self { capacities })
    }

    /// Number of links.
    pub fn num_links(&self) -> usize {
        self.capacities.len()
    }

    /// Capacity of link `i`.
    pub fn capacity(&self, i: usize) -> f64 {
        self.capacities[i]
    }

    /// All capacities, indexed by link.
    pub fn capacities(&self) -> &[f64] {
        &self.capacities
    }
}

/// Traffic-assignment oracle: maps a weight vector to per-link carried
/// traffic under destination-based shortest-path multi-splitting.
///
/// Implementations must be pure functions of `weights` for a fixed
/// topology and demand set, and must satisfy the monotonicity property the
/// evaluator's sweep pruning relies on: if a link carries zero traffic at
/// weight `w` (all other weights fixed), it carries zero traffic at every
/// weight above `w`. This holds for shortest-path routing and is not
/// verified by the engine.
pub trait TrafficOracle {
    /// Returns carried traffic per link, in link-index order.
    ///
    /// The result must have one entry per link, each finite and
    /// non-negative; the evaluator rejects anything else as
    /// [`OptError::OracleFailure`].
    fn carried_traffic(&self, weights: &[u32]) -> Result<Vec<f64>>;
}
