//! Solver configuration: the materialized, defaulted form of a parameter file.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    TwoOpt = 2,
    ThreeOpt = 3,
    FourOpt = 4,
    FiveOpt = 5,
}

impl MoveType {
    pub fn depth(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialTourAlgorithm {
    Walk,
    NearestNeighbor,
    Greedy,
    Boruvka,
    Random,
}

#[derive(Debug, Clone)]
pub struct Parameters {
    pub problem_file: String,
    pub output_tour_file: Option<String>,
    pub tour_file: Option<String>,
    pub runs: u32,
    pub max_trials: usize,
    pub max_candidates: usize,
    pub move_type: MoveType,
    pub backtracking: bool,
    pub precision: i32,
    pub seed: u64,
    pub time_limit: f64,
    pub population_size: usize,
    pub max_population_size: usize,
    pub stop_at_optimum: bool,
    pub optimum: Option<i64>,
    pub initial_period: usize,
    pub initial_tour_algorithm: InitialTourAlgorithm,
    pub subproblem_size: usize,
}

impl Parameters {
    /// Defaults for every key not explicitly set in the parameter file, applied once `dimension`
    /// (the problem size, needed for `MaxTrials`'s default) is known.
    pub fn with_defaults(problem_file: String, dimension: usize) -> Self {
        Self {
            problem_file,
            output_tour_file: None,
            tour_file: None,
            runs: 10,
            max_trials: dimension,
            max_candidates: 5,
            move_type: MoveType::FiveOpt,
            backtracking: true,
            precision: 100,
            seed: 1,
            time_limit: f64::INFINITY,
            population_size: 1,
            max_population_size: 10,
            stop_at_optimum: false,
            optimum: None,
            initial_period: dimension,
            initial_tour_algorithm: InitialTourAlgorithm::Greedy,
            subproblem_size: 0,
        }
    }
}
