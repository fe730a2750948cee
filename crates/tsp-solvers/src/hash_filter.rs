//! Hash-based duplicate-tour rejection: lets the outer run driver recognize a trial's local
//! optimum as one it has already seen, so it can be discarded instead of wasting a population
//! slot or a merge on a repeat.

use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tsp_core::tour::Tour;

pub struct HashFilter {
    node_hash: Vec<u64>,
    seen: HashSet<u64>,
}

impl HashFilter {
    /// Assigns every node a random 64-bit value (keyed by `seed`, for reproducibility); a tour's
    /// hash is the XOR of its edges' endpoint hashes, which is invariant under rotation and
    /// traversal direction.
    pub fn new(dimension: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let node_hash = (0..dimension).map(|_| rng.r#gen()).collect();
        Self {
            node_hash,
            seen: HashSet::new(),
        }
    }

    pub fn hash_of(&self, tour: &Tour) -> u64 {
        let n = tour.len();
        (0..n)
            .map(|i| {
                let a = tour.sequence()[i];
                let b = tour.sequence()[(i + 1) % n];
                self.node_hash[a.0] ^ self.node_hash[b.0]
            })
            .fold(0u64, |acc, h| acc ^ h)
    }

    pub fn contains(&self, tour: &Tour) -> bool {
        self.seen.contains(&self.hash_of(tour))
    }

    /// Records `tour`'s hash, returning `true` if it had not been seen before.
    pub fn insert(&mut self, tour: &Tour) -> bool {
        self.seen.insert(self.hash_of(tour))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Empties the table, as required on every new best tour and at run boundaries.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::node::Node;

    fn tour(ids: &[usize]) -> Tour {
        Tour::new(ids.iter().map(|&i| Node(i)).collect())
    }

    #[test]
    fn hash_is_invariant_under_rotation_and_direction() {
        let filter = HashFilter::new(5, 7);
        let a = tour(&[0, 1, 2, 3, 4]);
        let rotated = tour(&[2, 3, 4, 0, 1]);
        let reversed = tour(&[0, 4, 3, 2, 1]);
        assert_eq!(filter.hash_of(&a), filter.hash_of(&rotated));
        assert_eq!(filter.hash_of(&a), filter.hash_of(&reversed));
    }

    #[test]
    fn second_insert_of_the_same_tour_reports_a_duplicate() {
        let mut filter = HashFilter::new(5, 7);
        let a = tour(&[0, 1, 2, 3, 4]);
        assert!(filter.insert(&a));
        assert!(!filter.insert(&a));
        assert!(filter.contains(&a));
    }

    #[test]
    fn clear_forgets_previously_seen_tours() {
        let mut filter = HashFilter::new(5, 7);
        let a = tour(&[0, 1, 2, 3, 4]);
        assert!(filter.insert(&a));
        filter.clear();
        assert!(filter.is_empty());
        assert!(filter.insert(&a));
    }
}
