//! Held-Karp subgradient ascent over node potentials, and the alpha-value computation that turns
//! its final minimum 1-tree into per-node candidate edge lists.

use log::debug;
use rayon::prelude::*;
use tsp_core::{
    candidate::CandidateSet,
    instance::{
        TSPInstance,
        distance::Distance,
        edge::{UnEdge, WeightedEdge},
        node::Node,
    },
};

use crate::one_tree::{OneTree, min_one_tree};

#[derive(Debug, Clone)]
pub struct AscentResult {
    pub pi: Vec<Distance>,
    pub lower_bound: Distance,
    pub tree: OneTree,
}

/// Runs the subgradient method for up to `max_iterations` steps, returning the node potentials,
/// 1-tree and lower bound of whichever iteration scored highest.
///
/// Terminates early if an iteration's 1-tree has every node at degree 2: such a 1-tree is a
/// Hamiltonian cycle and therefore already optimal.
pub fn held_karp_ascent(instance: &TSPInstance, max_iterations: usize) -> AscentResult {
    let n = instance.dimension();
    let mut pi = vec![Distance::ZERO; n];

    let initial_tree = min_one_tree(instance, &pi);
    let mut step = initial_tree.length.0 as f64 / (2.0 * n as f64);
    let mut best = AscentResult {
        pi: pi.clone(),
        lower_bound: lower_bound_of(&initial_tree, &pi),
        tree: initial_tree,
    };

    for iteration in 0..max_iterations {
        let tree = min_one_tree(instance, &pi);
        if tree.degree.iter().all(|&d| d == 2) {
            debug!("ascent iteration {iteration}: 1-tree is already a Hamiltonian cycle");
            return AscentResult {
                pi: pi.clone(),
                lower_bound: lower_bound_of(&tree, &pi),
                tree,
            };
        }

        let lower_bound = lower_bound_of(&tree, &pi);
        if lower_bound > best.lower_bound {
            best = AscentResult {
                pi: pi.clone(),
                lower_bound,
                tree: tree.clone(),
            };
        }

        let squared_deviation: i64 = tree.degree.iter().map(|&d| (d as i64 - 2).pow(2)).sum();
        if squared_deviation == 0 {
            break;
        }

        // Classic Held-Karp schedule: the step shrinks linearly toward zero over the run.
        let t = step * (1.0 - iteration as f64 / max_iterations as f64).max(0.0);
        for i in 0..n {
            let delta = t * (tree.degree[i] as f64 - 2.0);
            pi[i] = Distance(pi[i].0 + delta.round() as i32);
        }
        step *= 0.999;
    }

    best
}

fn lower_bound_of(tree: &OneTree, pi: &[Distance]) -> Distance {
    let sum_pi: i64 = pi.iter().map(|p| p.0 as i64).sum();
    Distance(tree.length.0 - (2 * sum_pi) as i32)
}

/// Builds a [`CandidateSet`] from the final ascent 1-tree: every node's list is ranked by
/// alpha-value, the increase in the 1-tree lower bound that forcing a given edge would cause.
///
/// Edges already in the 1-tree get alpha zero. For any other edge `(i, j)`, alpha is the
/// transformed cost of `(i, j)` minus the most expensive transformed edge on the tree path
/// between `i` and `j` (the edge that adding `(i, j)` to the tree would let us discard).
pub fn build_candidate_set(
    instance: &TSPInstance,
    ascent: &AscentResult,
    max_candidates: usize,
) -> CandidateSet {
    let n = instance.dimension();
    let adjacency = build_adjacency(instance, &ascent.pi, &ascent.tree, n);

    // Every node's candidate list depends only on the shared adjacency and the ascent result, so
    // the n independent per-node passes can run across the thread pool.
    let per_node: Vec<Vec<WeightedEdge>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let node = Node(i);
            let path_max = max_edge_on_path_from(&adjacency, node, n);

            let mut edges = Vec::with_capacity(n - 1);
            for j in 0..n {
                if i == j {
                    continue;
                }
                let other = Node(j);
                let cost = instance.distance(node, other);
                let transformed = cost + ascent.pi[i] + ascent.pi[j];
                let in_tree = ascent
                    .tree
                    .edges
                    .iter()
                    .any(|edge| *edge == UnEdge::new(node, other));
                let alpha = if in_tree {
                    Distance::ZERO
                } else {
                    transformed - path_max[j]
                };
                edges.push(WeightedEdge::new(other, cost, alpha));
            }
            edges
        })
        .collect();

    let mut set = CandidateSet::new(n, max_candidates);
    for (i, edges) in per_node.into_iter().enumerate() {
        set.create(Node(i), edges);
    }
    set
}

fn build_adjacency(
    instance: &TSPInstance,
    pi: &[Distance],
    tree: &OneTree,
    n: usize,
) -> Vec<Vec<(Node, Distance)>> {
    let mut adjacency = vec![Vec::new(); n];
    for edge in &tree.edges {
        let cost = instance.distance(edge.from, edge.to) + pi[edge.from.0] + pi[edge.to.0];
        adjacency[edge.from.0].push((edge.to, cost));
        adjacency[edge.to.0].push((edge.from, cost));
    }
    adjacency
}

/// For every node reachable from `root` in the (near-tree) 1-tree graph, the maximum transformed
/// edge cost on a simple path from `root` to it. `root` itself is left at `Distance::MIN` and
/// never read by callers, which always skip `i == j`.
fn max_edge_on_path_from(adjacency: &[Vec<(Node, Distance)>], root: Node, n: usize) -> Vec<Distance> {
    let mut max_to = vec![Distance::MIN; n];
    let mut visited = vec![false; n];
    visited[root.0] = true;

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for &(next, cost) in &adjacency[node.0] {
            if !visited[next.0] {
                visited[next.0] = true;
                max_to[next.0] = if node == root {
                    cost
                } else {
                    max_to[node.0].max(cost)
                };
                stack.push(next);
            }
        }
    }
    max_to
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::{InstanceMetadata, matrix::EdgeDataMatrix};
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
    fn ascent_finds_the_optimal_tour_bound_on_a_square() {
        let instance = square_instance();
        let result = held_karp_ascent(&instance, 50);
        assert_eq!(result.lower_bound, Distance(4));
    }

    #[test]
    fn candidate_set_has_every_node_present() {
        let instance = square_instance();
        let result = held_karp_ascent(&instance, 50);
        let set = build_candidate_set(&instance, &result, 3);
        for i in 0..4 {
            assert!(!set.candidates(Node(i)).is_empty());
        }
    }
}
