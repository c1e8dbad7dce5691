//! Ant Colony Optimization (ACO).
//!
//! A population of constructive agents: each generation, every ant
//! rebuilds a weight vector link by link, sampling each weight from a
//! distribution mixing pheromone desirability with a greedy signal
//! (inverse objective of nearby weights, from the evaluator's sweep).
//! The best ants deposit pheromone proportional to solution quality and
//! the whole matrix evaporates, so consistently good assignments
//! accumulate desirability over generations.
//!
//! # Reference
//!
//! Dorigo, M. & Stützle, T. (2004). *Ant Colony Optimization*, MIT Press.

mod config;
mod runner;
mod types;

pub use config::AcoConfig;
pub use runner::{AcoResult, AcoRunner};
