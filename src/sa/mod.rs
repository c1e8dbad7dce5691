//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic: one random link's weight
//! is perturbed within `max_delta` per move, worsening moves are
//! accepted with probability `exp(-delta / T)`, and the temperature
//! follows a geometric schedule with acceptance-driven reheating: when
//! an inner loop freezes (almost no effective moves), the temperature
//! resets to its initial value instead of cooling further.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
