//! Merge-tour operator: assembles a child tour out of two parents' edges, the way a genetic
//! outer driver recombines the population's local optima.
//!
//! Edges shared by both parents are preferred (they survived two independent local searches and
//! are unlikely to be wrong); the rest of the cycle is closed with the same greedy,
//! degree-constrained assembly used for [`crate::initial_tour`]'s `Greedy` construction.

use std::collections::HashMap;

use tsp_core::{
    instance::{TSPInstance, node::Node},
    tour::Tour,
};

use crate::initial_tour::{UnionFind, tour_from_adjacency};

pub fn merge_tours(instance: &TSPInstance, a: &Tour, b: &Tour) -> Tour {
    let n = instance.dimension();

    let mut counts: HashMap<(Node, Node), u32> = HashMap::new();
    for tour in [a, b] {
        for i in 0..n {
            let u = tour.sequence()[i];
            let v = tour.sequence()[(i + 1) % n];
            let key = if u.0 < v.0 { (u, v) } else { (v, u) };
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut preferred: Vec<(Node, Node, u32)> =
        counts.into_iter().map(|((lo, hi), c)| (lo, hi, c)).collect();
    preferred.sort_by_key(|&(lo, hi, count)| (std::cmp::Reverse(count), instance.distance(lo, hi)));

    let mut degree = vec![0u8; n];
    let mut union_find = UnionFind::new(n);
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::with_capacity(2); n];
    let mut edges_added = 0;

    for (lo, hi, _) in preferred {
        try_add_edge(
            &mut degree,
            &mut union_find,
            &mut adjacency,
            &mut edges_added,
            n,
            lo,
            hi,
        );
    }

    if edges_added < n {
        let mut remaining: Vec<(Node, Node)> = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                remaining.push((Node(i), Node(j)));
            }
        }
        remaining.sort_by_key(|&(u, v)| instance.distance(u, v));
        for (u, v) in remaining {
            if edges_added == n {
                break;
            }
            try_add_edge(&mut degree, &mut union_find, &mut adjacency, &mut edges_added, n, u, v);
        }
    }

    tour_from_adjacency(&adjacency, n)
}

#[allow(clippy::too_many_arguments)]
fn try_add_edge(
    degree: &mut [u8],
    union_find: &mut UnionFind,
    adjacency: &mut [Vec<usize>],
    edges_added: &mut usize,
    n: usize,
    u: Node,
    v: Node,
) {
    if *edges_added == n || degree[u.0] >= 2 || degree[v.0] >= 2 {
        return;
    }
    if union_find.find(u.0) == union_find.find(v.0) && *edges_added != n - 1 {
        return;
    }
    union_find.union(u.0, v.0);
    degree[u.0] += 1;
    degree[v.0] += 1;
    adjacency[u.0].push(v.0);
    adjacency[v.0].push(u.0);
    *edges_added += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::{InstanceMetadata, distance::Distance, matrix::EdgeDataMatrix};
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

    #[test]
    fn merging_a_tour_with_itself_reproduces_it() {
        let instance = square_instance();
        let a = Tour::new(vec![Node(0), Node(1), Node(2), Node(3)]);
        let merged = merge_tours(&instance, &a, &a);
        assert_eq!(merged.cost(&instance), a.cost(&instance));
    }

    #[test]
    fn merging_two_different_optimal_orientations_stays_optimal() {
        let instance = square_instance();
        let a = Tour::new(vec![Node(0), Node(1), Node(2), Node(3)]);
        let b = Tour::new(vec![Node(0), Node(3), Node(2), Node(1)]);
        let merged = merge_tours(&instance, &a, &b);
        assert_eq!(merged.cost(&instance), Distance(4));
    }
}
