//! Sequential variable-depth local search: the Lin-Kernighan-style move generator that drives a
//! trial to a local optimum.
//!
//! Each step of the chain is realized as an actual 2-opt flip on the tour (rather than on an
//! abstract path structure), so the tour stays a valid Hamiltonian cycle after every step and the
//! accumulated gain is simply the running difference between the original and current tour cost.
//! A move that doesn't close with positive gain at one depth is kept applied and extended one
//! level deeper (up to the move type's depth); if no continuation at any depth improves on the
//! starting tour, every flip in the chain is undone in reverse order. Backtracking (trying more
//! than the single best candidate) is limited to the first level, matching the default behavior
//! of LKH-style implementations that only backtrack shallowly unless configured otherwise.

use tsp_core::{
    candidate::CandidateSet,
    instance::{TSPInstance, distance::Distance, edge::WeightedEdge, node::Node},
    params::Parameters,
    tour::Tour,
};

const FIRST_LEVEL_FANOUT: usize = 5;

/// Runs the local search to convergence: applies improving moves until none remain. `MaxTrials`
/// bounds the number of distinct restart trials a [`crate::trial::find_tour`] call performs, not
/// the depth of any single descent, so it plays no part here.
pub fn run_to_local_optimum(
    tour: &mut Tour,
    instance: &TSPInstance,
    candidates: &CandidateSet,
    params: &Parameters,
) {
    while improve_once(tour, instance, candidates, params) {}
}

fn improve_once(
    tour: &mut Tour,
    instance: &TSPInstance,
    candidates: &CandidateSet,
    params: &Parameters,
) -> bool {
    let n = tour.len();
    let max_depth = params.move_type.depth();
    for i in 0..n {
        let t1 = tour.sequence()[i];
        for t2 in [tour.succ(t1), tour.pred(t1)] {
            if search_level(
                tour,
                instance,
                candidates,
                t1,
                t2,
                1,
                max_depth,
                params.backtracking,
                Distance::ZERO,
            ) {
                return true;
            }
        }
    }
    false
}

/// Tries to extend the chain currently anchored at `t1` with its free end at `t2` (an actual
/// tour neighbor of `t1` in the current tour state). Returns `true` and leaves the improving
/// chain applied if one is found; otherwise undoes every flip it tried before returning `false`.
fn search_level(
    tour: &mut Tour,
    instance: &TSPInstance,
    candidates: &CandidateSet,
    t1: Node,
    t2: Node,
    depth: usize,
    max_depth: usize,
    backtracking: bool,
    gain_so_far: Distance,
) -> bool {
    if depth > max_depth {
        return false;
    }

    let fanout = if depth == 1 && backtracking {
        FIRST_LEVEL_FANOUT
    } else {
        1
    };

    let mut ranked: Vec<WeightedEdge> = candidates.candidates(t2).to_vec();
    ranked.sort_by_key(|edge| edge.cost);

    let succ_is_t2 = tour.succ(t1) == t2;

    for edge in ranked.into_iter().take(fanout) {
        let t3 = edge.to;
        if t3 == t1 || t3 == t2 {
            continue;
        }

        let (a, b, c, d, t4) = if succ_is_t2 {
            let t4 = tour.pred(t3);
            (t1, t2, t4, t3, t4)
        } else {
            let t4 = tour.succ(t3);
            (t2, t1, t3, t4, t4)
        };
        if t4 == t1 || t4 == t2 {
            continue;
        }

        let removed = instance.distance(a, b) + instance.distance(c, d);
        let added = instance.distance(a, c) + instance.distance(b, d);
        let delta = removed - added;
        let total_gain = gain_so_far + delta;

        tour.flip(a, b, c, d);

        if total_gain > Distance::ZERO {
            return true;
        }

        if search_level(
            tour,
            instance,
            candidates,
            t1,
            t4,
            depth + 1,
            max_depth,
            backtracking,
            total_gain,
        ) {
            return true;
        }

        undo_flip(tour, a, b, c, d);
    }

    false
}

/// Restores the tour to what it was before `tour.flip(a, b, c, d)` was called, regardless of
/// which of the two arcs that flip chose to reverse.
fn undo_flip(tour: &mut Tour, a: Node, b: Node, c: Node, d: Node) {
    if tour.succ(a) == c {
        tour.flip(a, c, b, d);
    } else {
        tour.flip(c, a, d, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::{InstanceMetadata, matrix::EdgeDataMatrix};
    use tsp_core::params::MoveType;
    use tsp_core::tsp_lib_spec::{EdgeWeightType, ProblemType};

    /// Four points of a unit square, given to the solver as a deliberately crossed tour
    /// (0-2-1-3-0) that a single 2-opt move should uncross into the optimal cycle.
    fn crossed_square() -> (TSPInstance, Tour) {
        let data = vec![
            Distance(0), Distance(1), Distance(2), Distance(1),
            Distance(1), Distance(0), Distance(1), Distance(2),
            Distance(2), Distance(1), Distance(0), Distance(1),
            Distance(1), Distance(2), Distance(1), Distance(0),
        ];
        let matrix = EdgeDataMatrix::new(data, 4);
        let mut metadata = InstanceMetadata::new("square".to_string(), ProblemType::TSP, 4);
        metadata.edge_weight_type = EdgeWeightType::EXPLICIT;
        let instance = TSPInstance::new(matrix, metadata);
        let tour = Tour::new(vec![Node(0), Node(2), Node(1), Node(3)]);
        (instance, tour)
    }

    fn full_candidate_set(instance: &TSPInstance) -> CandidateSet {
        let n = instance.dimension();
        let mut set = CandidateSet::new(n, n - 1);
        for i in 0..n {
            let edges: Vec<WeightedEdge> = (0..n)
                .filter(|&j| j != i)
                .map(|j| {
                    let cost = instance.distance(Node(i), Node(j));
                    WeightedEdge::new(Node(j), cost, cost)
                })
                .collect();
            set.create(Node(i), edges);
        }
        set
    }

    #[test]
    fn uncrosses_a_crossed_square_tour() {
        let (instance, mut tour) = crossed_square();
        let candidates = full_candidate_set(&instance);
        assert_eq!(tour.cost(&instance), Distance(6));

        let params = Parameters {
            move_type: MoveType::TwoOpt,
            ..Parameters::with_defaults(String::new(), 4)
        };
        run_to_local_optimum(&mut tour, &instance, &candidates, &params);

        assert_eq!(tour.cost(&instance), Distance(4));
    }

    #[test]
    fn local_optimum_on_an_already_optimal_square_is_a_no_op() {
        let (instance, _) = crossed_square();
        let mut tour = Tour::new(vec![Node(0), Node(1), Node(2), Node(3)]);
        let candidates = full_candidate_set(&instance);
        let params = Parameters {
            move_type: MoveType::FiveOpt,
            ..Parameters::with_defaults(String::new(), 4)
        };
        run_to_local_optimum(&mut tour, &instance, &candidates, &params);
        assert_eq!(tour.cost(&instance), Distance(4));
        assert_eq!(tour.sequence(), &[Node(0), Node(1), Node(2), Node(3)]);
    }
}
