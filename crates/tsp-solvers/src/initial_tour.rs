//! Initial tour construction: the starting point handed to the local search before its first
//! trial, chosen by [`InitialTourAlgorithm`].

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tsp_core::{
    instance::{TSPInstance, distance::Distance, node::Node},
    params::InitialTourAlgorithm,
    tour::Tour,
};

pub fn build_initial_tour(instance: &TSPInstance, algorithm: InitialTourAlgorithm, seed: u64) -> Tour {
    match algorithm {
        InitialTourAlgorithm::Walk => Tour::new((0..instance.dimension()).map(Node).collect()),
        InitialTourAlgorithm::Random => random_tour(instance, seed),
        InitialTourAlgorithm::NearestNeighbor => nearest_neighbor_tour(instance),
        InitialTourAlgorithm::Greedy => greedy_tour(instance),
        InitialTourAlgorithm::Boruvka => minimum_spanning_tree_tour(instance),
    }
}

fn random_tour(instance: &TSPInstance, seed: u64) -> Tour {
    let mut order: Vec<Node> = (0..instance.dimension()).map(Node).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    Tour::new(order)
}

fn nearest_neighbor_tour(instance: &TSPInstance) -> Tour {
    let n = instance.dimension();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = Node(0);
    visited[0] = true;
    order.push(current);

    for _ in 1..n {
        let mut nearest = None;
        let mut nearest_cost = Distance::MAX;
        for j in 0..n {
            if !visited[j] {
                let cost = instance.distance(current, Node(j));
                if cost < nearest_cost {
                    nearest_cost = cost;
                    nearest = Some(j);
                }
            }
        }
        let next = nearest.expect("unvisited node remains");
        visited[next] = true;
        order.push(Node(next));
        current = Node(next);
    }

    Tour::new(order)
}

/// Builds a tour by greedily inserting the cheapest edges that keep every node at degree <= 2 and
/// never close a cycle early, using union-find to detect would-be subtours.
fn greedy_tour(instance: &TSPInstance) -> Tour {
    let n = instance.dimension();
    let mut candidate_edges = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            candidate_edges.push((instance.distance(Node(i), Node(j)), i, j));
        }
    }
    candidate_edges.sort_unstable();

    let mut degree = vec![0u8; n];
    let mut union_find = UnionFind::new(n);
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::with_capacity(2); n];
    let mut edges_added = 0;

    for (_, i, j) in candidate_edges {
        if edges_added == n {
            break;
        }
        if degree[i] >= 2 || degree[j] >= 2 {
            continue;
        }
        if union_find.find(i) == union_find.find(j) && edges_added != n - 1 {
            continue;
        }
        union_find.union(i, j);
        degree[i] += 1;
        degree[j] += 1;
        adjacency[i].push(j);
        adjacency[j].push(i);
        edges_added += 1;
    }

    tour_from_adjacency(&adjacency, n)
}

/// Builds a tour from a minimum spanning tree by walking its DFS preorder and shortcutting
/// repeated nodes, the classic double-tree construction (with the matching step dropped).
fn minimum_spanning_tree_tour(instance: &TSPInstance) -> Tour {
    let n = instance.dimension();
    let mut in_tree = vec![false; n];
    let mut best_cost = vec![Distance::MAX; n];
    let mut best_from = vec![0usize; n];
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];

    in_tree[0] = true;
    for j in 1..n {
        best_cost[j] = instance.distance(Node(0), Node(j));
    }

    for _ in 1..n {
        let mut chosen = None;
        let mut chosen_cost = Distance::MAX;
        for j in 0..n {
            if !in_tree[j] && best_cost[j] < chosen_cost {
                chosen_cost = best_cost[j];
                chosen = Some(j);
            }
        }
        let chosen = chosen.expect("instance graph is connected");
        in_tree[chosen] = true;
        adjacency[chosen].push(best_from[chosen]);
        adjacency[best_from[chosen]].push(chosen);

        for j in 0..n {
            if !in_tree[j] {
                let cost = instance.distance(Node(chosen), Node(j));
                if cost < best_cost[j] {
                    best_cost[j] = cost;
                    best_from[j] = chosen;
                }
            }
        }
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut stack = vec![0usize];
    while let Some(node) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        order.push(Node(node));
        for &next in adjacency[node].iter().rev() {
            if !visited[next] {
                stack.push(next);
            }
        }
    }

    Tour::new(order)
}

/// Walks a degree-<=2 adjacency list (produced by [`greedy_tour`]) into a single tour, stitching
/// together any disjoint paths left over when fewer than `n` edges could be added.
pub(crate) fn tour_from_adjacency(adjacency: &[Vec<usize>], n: usize) -> Tour {
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = (0..n).find(|&i| adjacency[i].len() <= 1).unwrap_or(0);
    loop {
        if visited[current] {
            if let Some(next) = (0..n).find(|&i| !visited[i]) {
                current = next;
            } else {
                break;
            }
        }
        visited[current] = true;
        order.push(Node(current));

        let next = adjacency[current].iter().find(|&&neighbor| !visited[neighbor]).copied();
        match next {
            Some(next) => current = next,
            None => {
                if let Some(unvisited) = (0..n).find(|&i| !visited[i]) {
                    current = unvisited;
                } else {
                    break;
                }
            }
        }
    }

    Tour::new(order)
}

pub(crate) struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    pub(crate) fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
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

    fn assert_is_valid_permutation(tour: &Tour, n: usize) {
        let mut seen = vec![false; n];
        for i in 0..n {
            seen[tour.sequence()[i].0] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(tour.len(), n);
    }

    #[test]
    fn nearest_neighbor_visits_every_node_once() {
        let instance = square_instance();
        let tour = nearest_neighbor_tour(&instance);
        assert_is_valid_permutation(&tour, 4);
    }

    #[test]
    fn greedy_finds_the_optimal_square_tour() {
        let instance = square_instance();
        let tour = greedy_tour(&instance);
        assert_is_valid_permutation(&tour, 4);
        assert_eq!(tour.cost(&instance), Distance(4));
    }

    #[test]
    fn minimum_spanning_tree_tour_visits_every_node_once() {
        let instance = square_instance();
        let tour = minimum_spanning_tree_tour(&instance);
        assert_is_valid_permutation(&tour, 4);
    }
}
