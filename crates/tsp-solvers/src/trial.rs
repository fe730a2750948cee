//! FindTour: drives up to `MaxTrials` independent local-search descents, merging each one against
//! the best tour found so far (and, failing that, against the trivial identity tour) and
//! returning whichever distinct local optimum is cheapest.

use std::time::Instant;

use tsp_core::{
    candidate::CandidateSet, instance::TSPInstance, instance::distance::Distance,
    instance::node::Node, params::Parameters, tour::Tour,
};

use crate::{hash_filter::HashFilter, initial_tour::build_initial_tour, lk, merge::merge_tours};

/// Outcome of a `find_tour` call. `tour` is `None` only when `params.max_trials == 0`, in which
/// case no descent ever ran and `cost` stays `Distance::MAX` — the caller must not treat this as
/// a tour to record or write out.
pub struct FindTourResult {
    pub tour: Option<Tour>,
    pub cost: Distance,
    pub trials_run: usize,
}

/// Runs `FindTour`: up to `params.max_trials` descents from freshly constructed (or, for the
/// first trial, caller-supplied) starting tours, each merged against the running best tour (and,
/// if still no better than the identity tour, against the identity tour too), tracking whichever
/// distinct local optimum is cheapest. `candidates` is adjusted (backbone edges promoted) and the
/// hash table cleared every time a new best is found, and reset once the loop ends.
pub fn find_tour(
    instance: &TSPInstance,
    candidates: &mut CandidateSet,
    params: &Parameters,
    seed: u64,
    seed_tour: Option<Tour>,
) -> FindTourResult {
    let n = instance.dimension();
    let ordinal_tour = Tour::new((0..n).map(Node).collect());
    let ordinal_cost = ordinal_tour.cost(instance);

    let mut hash_filter = HashFilter::new(n, seed);
    let mut better: Option<Tour> = None;
    let mut better_cost = Distance::MAX;

    let start = Instant::now();
    let mut trials_run = 0;
    let mut seed_tour = seed_tour;

    for trial in 0..params.max_trials {
        if start.elapsed().as_secs_f64() >= params.time_limit {
            break;
        }
        trials_run += 1;

        let trial_seed = seed.wrapping_add(trial as u64);
        let mut tour = seed_tour
            .take()
            .unwrap_or_else(|| build_initial_tour(instance, params.initial_tour_algorithm, trial_seed));
        lk::run_to_local_optimum(&mut tour, instance, candidates, params);
        let mut cost = tour.cost(instance);

        // 4.8.d: merge with the previous better tour, if one exists.
        if let Some(previous_better) = &better {
            let merged = merge_tours(instance, &tour, previous_better);
            let merged_cost = merged.cost(instance);
            if merged_cost < cost {
                tour = merged;
                cost = merged_cost;
            }
        }

        // 4.8.e: still worse than the identity tour, but the identity tour would itself be an
        // improvement over the current best — merge with it too.
        if cost > ordinal_cost && ordinal_cost < better_cost {
            let merged = merge_tours(instance, &tour, &ordinal_tour);
            let merged_cost = merged.cost(instance);
            if merged_cost < cost {
                tour = merged;
                cost = merged_cost;
            }
        }

        // 4.8.f: record a new best, promote its backbone edges, and forget every hash seen so far.
        if cost < better_cost {
            let second_best = better.clone().unwrap_or_else(|| tour.clone());
            candidates.adjust(&tour, &second_best);

            better_cost = cost;
            better = Some(tour.clone());

            hash_filter.clear();
            hash_filter.insert(&tour);

            if params.stop_at_optimum {
                if let Some(optimum) = params.optimum {
                    if cost.0 as i64 <= optimum {
                        break;
                    }
                }
            }
        }
    }

    candidates.reset();

    FindTourResult {
        tour: better,
        cost: better_cost,
        trials_run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::instance::{InstanceMetadata, matrix::EdgeDataMatrix};
    use tsp_core::params::InitialTourAlgorithm;
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

    fn full_candidate_set(instance: &TSPInstance) -> CandidateSet {
        use tsp_core::instance::edge::WeightedEdge;
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
    fn a_trial_from_any_initial_algorithm_reaches_the_optimal_square_tour() {
        let instance = square_instance();
        let mut candidates = full_candidate_set(&instance);
        let mut params = Parameters::with_defaults(String::new(), 4);
        params.initial_tour_algorithm = InitialTourAlgorithm::Random;
        let result = find_tour(&instance, &mut candidates, &params, 42, None);
        assert_eq!(result.cost, Distance(4));
        assert!(result.tour.is_some());
    }

    #[test]
    fn zero_max_trials_returns_no_tour_and_an_infinite_cost() {
        let instance = square_instance();
        let mut candidates = full_candidate_set(&instance);
        let mut params = Parameters::with_defaults(String::new(), 4);
        params.max_trials = 0;
        let result = find_tour(&instance, &mut candidates, &params, 1, None);
        assert!(result.tour.is_none());
        assert_eq!(result.cost, Distance::MAX);
        assert_eq!(result.trials_run, 0);
    }

    #[test]
    fn a_supplied_seed_tour_is_used_for_the_first_trial() {
        let instance = square_instance();
        let mut candidates = full_candidate_set(&instance);
        let params = Parameters::with_defaults(String::new(), 4);
        let seed_tour = Tour::new(vec![Node(0), Node(1), Node(2), Node(3)]);
        let result = find_tour(&instance, &mut candidates, &params, 7, Some(seed_tour));
        assert_eq!(result.cost, Distance(4));
    }
}
