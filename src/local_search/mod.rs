//! Single-link hill climbing.
//!
//! # Algorithm
//!
//! 1. Generate an initial weight vector (random or all-ones)
//! 2. Repeat, over a freshly shuffled link order each pass:
//!    a. Enumerate each link's weight candidates within `max_delta`
//!    b. First-fit: commit the first strictly improving candidate and
//!       keep scanning; best-fit: commit the single best improving
//!       candidate of the pass
//! 3. Stop when a full pass commits nothing; the solution is locally
//!    optimal for the single-link neighborhood
//!
//! Deterministic for a fixed seed; the only randomness is the per-pass
//! link order and the initial solution.

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::{LocalSearchResult, LocalSearchRunner};
