//! Pheromone memory for the ant colony driver.

/// Per-(link, weight) desirability scores, reinforced by elite ants and
/// decayed by evaporation. All entries start at 1 so the first
/// generation samples uniformly.
#[derive(Debug, Clone)]
pub(crate) struct Pheromone {
    levels: Vec<Vec<f64>>,
}

impl Pheromone {
    pub fn new(num_links: usize, max_weight: u32) -> Self {
        Self {
            levels: vec![vec![1.0; max_weight as usize]; num_links],
        }
    }

    /// Desirability of assigning `weight` (1-based) to `link`.
    pub fn level(&self, link: usize, weight: u32) -> f64 {
        self.levels[link][(weight - 1) as usize]
    }

    pub fn reinforce(&mut self, link: usize, weight: u32, amount: f64) {
        self.levels[link][(weight - 1) as usize] += amount;
    }

    /// Decays every entry by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        for row in &mut self.levels {
            for level in row {
                *level *= 1.0 - rate;
            }
        }
    }
}
