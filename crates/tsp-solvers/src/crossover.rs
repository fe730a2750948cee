//! Edge-recombination crossover: the genetic outer loop's way of turning two population members
//! into a child tour once the population has saturated, fed as the next run's initial tour.
//!
//! Treats both parents as a directed edge bag (each node's in-tour neighbors from either parent),
//! then greedily walks the child tour always stepping to whichever unvisited candidate has the
//! fewest neighbors left (the node most at risk of getting stranded), breaking ties by candidate
//! alpha the same way the sequential search ranks edges.

use std::collections::HashSet;

use rand::{Rng, rngs::StdRng};
use tsp_core::{candidate::CandidateSet, instance::distance::Distance, instance::node::Node, tour::Tour};

pub fn erx_crossover(a: &Tour, b: &Tour, candidates: &CandidateSet, rng: &mut StdRng) -> Tour {
    let n = a.len();
    let mut neighbors: Vec<HashSet<Node>> = vec![HashSet::new(); n];
    for tour in [a, b] {
        for i in 0..n {
            let node = tour.sequence()[i];
            neighbors[node.0].insert(tour.succ(node));
            neighbors[node.0].insert(tour.pred(node));
        }
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = a.sequence()[rng.gen_range(0..n)];
    visited[current.0] = true;
    order.push(current);

    while order.len() < n {
        for list in &mut neighbors {
            list.remove(&current);
        }

        let next = pick_next(current, &neighbors, &visited, candidates)
            .unwrap_or_else(|| (0..n).map(Node).find(|node| !visited[node.0]).expect("unvisited node remains"));

        visited[next.0] = true;
        order.push(next);
        current = next;
    }

    Tour::new(order)
}

fn pick_next(
    current: Node,
    neighbors: &[HashSet<Node>],
    visited: &[bool],
    candidates: &CandidateSet,
) -> Option<Node> {
    neighbors[current.0]
        .iter()
        .copied()
        .filter(|node| !visited[node.0])
        .min_by_key(|&node| (neighbors[node.0].len(), alpha_from(current, node, candidates)))
}

fn alpha_from(from: Node, to: Node, candidates: &CandidateSet) -> Distance {
    candidates
        .candidates(from)
        .iter()
        .find(|edge| edge.to == to)
        .map(|edge| edge.alpha)
        .unwrap_or(Distance::MAX)
}

/// Picks two distinct population indices by linear rank selection with bias 1.25: the
/// best-ranked member (rank 0) is `bias` times as likely to be drawn as the median member, and
/// the worst-ranked member `2 - bias` times as likely.
pub fn select_parents_by_rank(costs: &[Distance], rng: &mut StdRng) -> (usize, usize) {
    const BIAS: f64 = 1.25;
    let n = costs.len();
    assert!(n >= 2, "rank selection needs at least two population members");

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| costs[i]);

    let weights: Vec<f64> = (0..n)
        .map(|rank| BIAS - 2.0 * (BIAS - 1.0) * (rank as f64) / ((n - 1) as f64))
        .collect();
    let total: f64 = weights.iter().sum();

    let pick = |rng: &mut StdRng| {
        let mut x = rng.r#gen::<f64>() * total;
        for (rank, &w) in weights.iter().enumerate() {
            if x < w {
                return order[rank];
            }
            x -= w;
        }
        *order.last().expect("population is non-empty")
    };

    let first = pick(rng);
    loop {
        let second = pick(rng);
        if second != first {
            return (first, second);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tsp_core::instance::{InstanceMetadata, matrix::EdgeDataMatrix, TSPInstance};
    use tsp_core::tsp_lib_spec::{EdgeWeightType, ProblemType};

    fn square_instance() -> TSPInstance {
        let data = vec![
            Distance(0), Distance(1), Distance(2), Distance(1),
            Distance(1), Distance(0), Distance(1), Distance(2),
            Distance(2), Distance(1), Distance(0), Distance(1),
            Distance(1), Distance(2), Distance(1), Distance(0),
        ];
        let matrix = EdgeDataMatrix::new(data, 4);
        let mut metadata = InstanceMetadata::new("square".to_string(), ProblemType::TSP, 4);
        metadata.edge_weight_type = EdgeWeightType::EXPLICIT;
        TSPInstance::new(matrix, metadata)
    }

    fn empty_candidate_set(n: usize) -> CandidateSet {
        let mut set = CandidateSet::new(n, 5);
        for i in 0..n {
            set.create(Node(i), vec![]);
        }
        set
    }

    #[test]
    fn crossing_a_tour_with_itself_reproduces_it() {
        let instance = square_instance();
        let candidates = empty_candidate_set(4);
        let a = Tour::new(vec![Node(0), Node(1), Node(2), Node(3)]);
        let mut rng = StdRng::seed_from_u64(1);
        let child = erx_crossover(&a, &a, &candidates, &mut rng);
        assert_eq!(child.cost(&instance), a.cost(&instance));
    }

    #[test]
    fn child_visits_every_node_exactly_once() {
        let instance = square_instance();
        let candidates = empty_candidate_set(4);
        let a = Tour::new(vec![Node(0), Node(1), Node(2), Node(3)]);
        let b = Tour::new(vec![Node(0), Node(2), Node(1), Node(3)]);
        let mut rng = StdRng::seed_from_u64(2);
        let child = erx_crossover(&a, &b, &candidates, &mut rng);
        let mut seen = vec![false; instance.dimension()];
        for i in 0..4 {
            seen[child.sequence()[i].0] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn rank_selection_always_favors_the_best_ranked_member_over_many_draws() {
        let costs = vec![Distance(1), Distance(10), Distance(20), Distance(30)];
        let mut rng = StdRng::seed_from_u64(3);
        let mut best_picks = 0;
        for _ in 0..200 {
            let (a, b) = select_parents_by_rank(&costs, &mut rng);
            assert_ne!(a, b);
            if a == 0 || b == 0 {
                best_picks += 1;
            }
        }
        assert!(best_picks > 50, "rank 0 should be drawn much more than uniformly at random");
    }
}
