//! Minimum 1-tree construction: a minimum spanning tree over every node but one "special" node
//! (node 0), plus the two cheapest edges connecting the special node back into the graph.
//!
//! The minimum 1-tree is the core subroutine of the Held-Karp subgradient ascent in
//! [crate::ascent]: when computed under a set of node potentials, its degree sequence drives the
//! subgradient update, and a 1-tree whose every node has degree 2 is itself an optimal tour.

use tsp_core::instance::{TSPInstance, distance::Distance, edge::UnEdge, node::Node};

#[derive(Debug, Clone)]
pub struct OneTree {
    pub edges: Vec<UnEdge>,
    pub degree: Vec<u32>,
    pub length: Distance,
}

/// Builds the minimum 1-tree for `instance` under node potentials `pi`, using transformed edge
/// costs `d(i, j) + pi[i] + pi[j]` throughout, as required by the subgradient method.
pub fn min_one_tree(instance: &TSPInstance, pi: &[Distance]) -> OneTree {
    let n = instance.dimension();
    debug_assert!(n >= 3, "a 1-tree needs at least 3 nodes");

    let (mut edges, mut length) = min_spanning_tree_excluding(instance, pi, Node(0));

    let mut best: [(Distance, usize); 2] = [(Distance::MAX, usize::MAX); 2];
    for j in 1..n {
        let cost = transformed_distance(instance, pi, Node(0), Node(j));
        if cost < best[0].0 {
            best[1] = best[0];
            best[0] = (cost, j);
        } else if cost < best[1].0 {
            best[1] = (cost, j);
        }
    }
    for &(cost, j) in &best {
        edges.push(UnEdge::new(Node(0), Node(j)));
        length += cost;
    }

    let mut degree = vec![0u32; n];
    for edge in &edges {
        degree[edge.from.0] += 1;
        degree[edge.to.0] += 1;
    }

    OneTree {
        edges,
        degree,
        length,
    }
}

#[inline]
fn transformed_distance(instance: &TSPInstance, pi: &[Distance], a: Node, b: Node) -> Distance {
    instance.distance(a, b) + pi[a.0] + pi[b.0]
}

/// Prim's algorithm over every node except `excluded`, using transformed edge costs.
fn min_spanning_tree_excluding(
    instance: &TSPInstance,
    pi: &[Distance],
    excluded: Node,
) -> (Vec<UnEdge>, Distance) {
    let n = instance.dimension();
    let start = (0..n).find(|&i| i != excluded.0).expect("instance has at least 2 nodes");

    let mut in_tree = vec![false; n];
    in_tree[excluded.0] = true;
    in_tree[start] = true;

    let mut best_cost = vec![Distance::MAX; n];
    let mut best_from = vec![Node(0); n];
    for j in 0..n {
        if j != excluded.0 && j != start {
            best_cost[j] = transformed_distance(instance, pi, Node(start), Node(j));
            best_from[j] = Node(start);
        }
    }

    let remaining = n - 2;
    let mut edges = Vec::with_capacity(remaining);
    let mut length = Distance::ZERO;

    for _ in 0..remaining {
        let mut chosen = None;
        let mut chosen_cost = Distance::MAX;
        for j in 0..n {
            if !in_tree[j] && best_cost[j] < chosen_cost {
                chosen_cost = best_cost[j];
                chosen = Some(j);
            }
        }
        let chosen = chosen.expect("the instance graph is connected");
        in_tree[chosen] = true;
        edges.push(UnEdge::new(best_from[chosen], Node(chosen)));
        length += chosen_cost;

        for j in 0..n {
            if !in_tree[j] && j != excluded.0 {
                let cost = transformed_distance(instance, pi, Node(chosen), Node(j));
                if cost < best_cost[j] {
                    best_cost[j] = cost;
                    best_from[j] = Node(chosen);
                }
            }
        }
    }

    (edges, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::{InstanceMetadata, matrix::EdgeDataMatrix};
    use tsp_core::tsp_lib_spec::{EdgeWeightType, ProblemType};

    fn square_instance() -> TSPInstance {
        // A unit square: 0-1-2-3-0, diagonals longer than sides.
        let data = vec![
            Distance(0), Distance(1), Distance(2), Distance(1),
            Distance(1), Distance(0), Distance(1), Distance(2),
            Distance(2), Distance(1), Distance(0), Distance(1),
            Distance(1), Distance(2), Distance(1), Distance(0),
        ];
        let matrix = EdgeDataMatrix::new(data, 4);
        let metadata = InstanceMetadata::new("square".to_string(), ProblemType::TSP, 4);
        let mut metadata = metadata;
        metadata.edge_weight_type = EdgeWeightType::EXPLICIT;
        TSPInstance::new(matrix, metadata)
    }

    #[test]
    fn one_tree_of_a_square_is_the_cycle_itself() {
        let instance = square_instance();
        let pi = vec![Distance::ZERO; 4];
        let tree = min_one_tree(&instance, &pi);
        assert_eq!(tree.length, Distance(4));
        assert!(tree.degree.iter().all(|&d| d == 2));
    }
}
