//! Evolutionary algorithm (EA).
//!
//! Population-based search over weight vectors: parents are a mix of
//! uniform-random picks and the current elite, couples produce one child
//! each by uniform crossover, every child gets exactly one link reset to
//! a random weight, and truncation selection keeps the best
//! `population_size` individuals. Per-link weight entropy is tracked as
//! a diversity diagnostic.
//!
//! Lower objective is better throughout, including the initial
//! incumbent.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;

pub use config::EaConfig;
pub use runner::{EaResult, EaRunner};
