//! Crate-wide error taxonomy.
//!
//! Nothing in this crate retries: configuration problems are rejected before
//! the first oracle call, oracle problems abort the run immediately, and
//! internal invariant failures are surfaced with diagnostic state.

use thiserror::Error;

/// Errors produced by the optimization engine.
#[derive(Debug, Error)]
pub enum OptError {
    /// A parameter is out of range or inconsistent. Raised eagerly by
    /// constructors and `validate()` methods, never mid-run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The traffic oracle failed or returned inconsistent data (wrong
    /// length, negative or non-finite load). The oracle is assumed
    /// deterministic, so this is a programming or data error.
    #[error("traffic oracle failure: {0}")]
    OracleFailure(String),

    /// An internal consistency check failed. Fatal; carries enough state
    /// to diagnose the run that produced it.
    #[error("invariant violation at iteration {iteration}: {detail}")]
    InvariantViolation {
        /// Outer-loop iteration at which the check failed.
        iteration: u64,
        /// Human-readable description, including relevant driver state.
        detail: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptError>;
