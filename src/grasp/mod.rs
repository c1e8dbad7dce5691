//! Greedy Randomized Adaptive Search Procedure.
//!
//! # Algorithm
//!
//! 1. **Construction**: starting from a fresh initial vector, visit the
//!    links in random order; for each, enumerate nearby weights, build a
//!    restricted candidate list (RCL) of those within `rcl_factor` of the
//!    best-to-worst spread, and commit a uniform draw from it
//! 2. **Refinement**: first-fit local search from the constructed vector
//! 3. Keep the best solution seen after either phase; repeat until the
//!    iteration or wall-clock budget runs out
//!
//! `rcl_factor = 0` degenerates to pure greedy construction,
//! `rcl_factor = 1` to uniform choice among all sampled weights.
//!
//! # Reference
//!
//! Feo, T. & Resende, M. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

mod config;
mod runner;

pub use config::GraspConfig;
pub use runner::{GraspResult, GraspRunner};
