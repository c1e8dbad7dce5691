//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic with memory: the best
//! single-link move over the full weight range is committed each
//! iteration, recently moved links are forbidden for a fixed number of
//! iterations (aspiration admits a tabu move that beats the incumbent),
//! and long stagnation triggers diversification toward each link's
//! least-visited weights.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;
mod types;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
