//! Outer run driver: builds the candidate set once via the Held-Karp ascent, then repeatedly
//! runs FindTour trials, recombining and filtering the growing population the way a genetic
//! outer loop over local optima does. Once the population saturates, two parents are drawn by
//! rank selection and recombined via ERX crossover to seed the next run's first trial.

use std::time::Instant;

use log::info;
use rand::{SeedableRng, rngs::StdRng};
use tsp_core::{
    instance::{TSPInstance, distance::Distance},
    params::Parameters,
    stats::SolveStats,
    tour::Tour,
};

use crate::{
    ascent::{build_candidate_set, held_karp_ascent},
    crossover::{erx_crossover, select_parents_by_rank},
    trial::find_tour,
};

#[derive(Debug)]
pub struct RunResult {
    pub tour: Option<Tour>,
    pub cost: Distance,
    pub stats: SolveStats,
}

/// Runs up to `params.runs` trials (each itself up to `params.max_trials` `FindTour` descents),
/// recombining each run's result with the growing population and keeping the best distinct tour
/// seen. Stops early on `params.time_limit` or, if `params.stop_at_optimum` and `params.optimum`
/// are set, once a run matches the target. `tour` is `None` only if every run's `FindTour` call
/// returned no tour (i.e. `params.max_trials == 0`).
pub fn run(instance: &TSPInstance, params: &Parameters) -> RunResult {
    let ascent = held_karp_ascent(instance, instance.dimension().max(1) * 2);
    info!("Held-Karp lower bound: {:?}", ascent.lower_bound.0);
    let mut candidates = build_candidate_set(instance, &ascent, params.max_candidates);

    let mut population: Vec<Tour> = Vec::with_capacity(params.max_population_size);
    let mut rng = StdRng::seed_from_u64(params.seed);

    let mut best: Option<Tour> = None;
    let mut best_cost = Distance::MAX;

    let start = Instant::now();
    let mut trials_run = 0;
    let mut runs_run = 0;
    let mut next_seed_tour: Option<Tour> = None;

    for run_index in 0..params.runs {
        if start.elapsed().as_secs_f64() > params.time_limit {
            info!("run {run_index}: time limit reached, stopping");
            break;
        }
        runs_run += 1;

        let seed = params.seed.wrapping_add(run_index as u64);
        let result = find_tour(instance, &mut candidates, params, seed, next_seed_tour.take());
        trials_run += result.trials_run;

        let Some(mut tour) = result.tour else {
            // MaxTrials == 0: FindTour never ran a descent this run.
            continue;
        };
        let mut cost = result.cost;

        if population.len() >= params.population_size.max(2) {
            for member in &population {
                let merged = merge_best_of(instance, &tour, member, cost);
                if let Some((merged_tour, merged_cost)) = merged {
                    tour = merged_tour;
                    cost = merged_cost;
                }
            }
        } else if run_index > 0 {
            if let Some(current_best) = &best {
                if let Some((merged_tour, merged_cost)) = merge_best_of(instance, &tour, current_best, cost) {
                    tour = merged_tour;
                    cost = merged_cost;
                }
            }
        }

        // 4.10.g: a tour already present in the population by cost adds nothing new.
        if population.iter().any(|member| member.cost(instance) == cost) {
            continue;
        }

        if cost < best_cost {
            best_cost = cost;
            best = Some(tour.clone());
        }

        if population.len() < params.max_population_size {
            population.push(tour);
        } else if let Some(worst_index) = worst_in_population(instance, &population) {
            if cost < population[worst_index].cost(instance) {
                population[worst_index] = tour;
            }
        }

        if params.stop_at_optimum {
            if let Some(optimum) = params.optimum {
                if cost.0 as i64 <= optimum {
                    info!("run {run_index}: reached target optimum {optimum}");
                    break;
                }
            }
        }

        if population.len() >= params.max_population_size.max(2) && run_index + 1 < params.runs {
            let costs: Vec<Distance> = population.iter().map(|t| t.cost(instance)).collect();
            let (a, b) = select_parents_by_rank(&costs, &mut rng);
            next_seed_tour = Some(erx_crossover(&population[a], &population[b], &candidates, &mut rng));
        }
    }

    let stats = SolveStats {
        lower_bound: ascent.lower_bound,
        elapsed: start.elapsed(),
        runs_run,
        trials_run,
    };

    RunResult {
        tour: best.clone(),
        cost: best.map_or(Distance::MAX, |tour| tour.cost(instance)),
        stats,
    }
}

/// Merges `tour` (at `cost`) with `other`, returning the merged tour and its cost only if it
/// improves on `cost`.
fn merge_best_of(instance: &TSPInstance, tour: &Tour, other: &Tour, cost: Distance) -> Option<(Tour, Distance)> {
    let merged = crate::merge::merge_tours(instance, tour, other);
    let merged_cost = merged.cost(instance);
    (merged_cost < cost).then_some((merged, merged_cost))
}

fn worst_in_population(instance: &TSPInstance, population: &[Tour]) -> Option<usize> {
    population
        .iter()
        .enumerate()
        .max_by_key(|(_, tour)| tour.cost(instance))
        .map(|(index, _)| index)
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
    fn run_finds_the_optimal_square_tour() {
        let instance = square_instance();
        let mut params = Parameters::with_defaults(String::new(), 4);
        params.runs = 5;
        let result = run(&instance, &params);
        assert_eq!(result.cost, Distance(4));
        assert!(result.tour.is_some());
    }

    #[test]
    fn run_stops_early_once_the_target_optimum_is_reached() {
        let instance = square_instance();
        let mut params = Parameters::with_defaults(String::new(), 4);
        params.runs = 20;
        params.stop_at_optimum = true;
        params.optimum = Some(4);
        let result = run(&instance, &params);
        assert_eq!(result.cost, Distance(4));
        assert!(result.stats.runs_run <= 20);
    }

    #[test]
    fn zero_max_trials_yields_no_tour_and_an_infinite_cost() {
        let instance = square_instance();
        let mut params = Parameters::with_defaults(String::new(), 4);
        params.runs = 3;
        params.max_trials = 0;
        let result = run(&instance, &params);
        assert!(result.tour.is_none());
        assert_eq!(result.cost, Distance::MAX);
    }

    #[test]
    fn reports_solve_stats_alongside_the_best_tour() {
        let instance = square_instance();
        let mut params = Parameters::with_defaults(String::new(), 4);
        params.runs = 5;
        let result = run(&instance, &params);
        assert!(result.stats.trials_run > 0);
        assert!(result.stats.lower_bound <= result.cost);
    }
}
