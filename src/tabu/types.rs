//! Tabu memory structures: the short-term FIFO list and the long-term
//! visitation-frequency table.

use rand::Rng;
use std::collections::VecDeque;

/// Fixed-capacity FIFO of recently moved links with per-link counters.
///
/// A link may occupy several slots at once; it is tabu while its counter
/// is positive. Eviction decrements the counter, and the queue and the
/// counters are kept in sync by these mutators alone.
#[derive(Debug, Clone)]
pub(crate) struct TabuList {
    queue: VecDeque<usize>,
    counts: Vec<u32>,
    capacity: usize,
}

impl TabuList {
    pub fn new(capacity: usize, num_links: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            counts: vec![0; num_links],
            capacity,
        }
    }

    /// Marks `link` tabu, evicting the oldest entry when full.
    pub fn push(&mut self, link: usize) {
        if self.queue.len() == self.capacity {
            if let Some(old) = self.queue.pop_front() {
                debug_assert!(self.counts[old] > 0, "tabu counter underflow");
                self.counts[old] = self.counts[old].saturating_sub(1);
            }
        }
        self.queue.push_back(link);
        self.counts[link] += 1;
    }

    pub fn is_tabu(&self, link: usize) -> bool {
        self.counts[link] > 0
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.counts.fill(0);
    }
}

/// Long-term memory: how often each (link, weight) assignment was
/// committed. Drives diversification toward rarely visited weights.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyTable {
    counts: Vec<Vec<u64>>,
}

impl FrequencyTable {
    pub fn new(num_links: usize, max_weight: u32) -> Self {
        Self {
            counts: vec![vec![0; max_weight as usize]; num_links],
        }
    }

    pub fn record(&mut self, link: usize, weight: u32) {
        self.counts[link][(weight - 1) as usize] += 1;
    }

    /// Uniform draw among the least-visited half of `link`'s weights.
    pub fn sample_rare_weight<R: Rng>(&self, link: usize, rng: &mut R) -> u32 {
        let row = &self.counts[link];
        let mut order: Vec<usize> = (0..row.len()).collect();
        order.sort_by_key(|&w| row[w]);
        let half = order.len().div_ceil(2);
        (order[rng.random_range(0..half)] + 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tabu_list_fifo_eviction() {
        let mut list = TabuList::new(2, 4);
        list.push(0);
        list.push(1);
        assert!(list.is_tabu(0) && list.is_tabu(1));
        list.push(2); // evicts 0
        assert!(!list.is_tabu(0));
        assert!(list.is_tabu(1) && list.is_tabu(2));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_tabu_list_multiple_slots_per_link() {
        let mut list = TabuList::new(3, 4);
        list.push(1);
        list.push(1);
        list.push(1);
        assert!(list.is_tabu(1));
        list.push(2); // evicts one slot of link 1
        assert!(list.is_tabu(1), "link 1 still holds two slots");
        list.push(2);
        list.push(2);
        assert!(!list.is_tabu(1));
    }

    #[test]
    fn test_tabu_list_clear() {
        let mut list = TabuList::new(2, 3);
        list.push(0);
        list.push(1);
        list.clear();
        assert_eq!(list.len(), 0);
        assert!(!list.is_tabu(0) && !list.is_tabu(1));
    }

    #[test]
    fn test_frequency_sample_prefers_unvisited() {
        let mut freq = FrequencyTable::new(1, 4);
        // Weights 1 and 2 heavily visited; 3 and 4 never.
        for _ in 0..10 {
            freq.record(0, 1);
            freq.record(0, 2);
        }
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let w = freq.sample_rare_weight(0, &mut rng);
            assert!(w == 3 || w == 4, "expected an unvisited weight, got {w}");
        }
    }
}
