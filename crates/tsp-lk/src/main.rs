//! Single-binary CLI driver: reads one parameter-file path, solves the named problem instance,
//! and writes the resulting tour.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::info;
use thiserror::Error;
use tsp_core::{instance::TSPInstance, params::Parameters};
use tsp_parser::{ParserError, params::ParameterFileError, tour_file::TourFileError};

#[derive(Parser)]
#[command(name = "tsp-lk", about = "Lin-Kernighan-style TSP solver")]
struct Cli {
    /// Path to a `KEY = VALUE` parameter file naming the problem to solve.
    parameter_file: PathBuf,
}

#[derive(Error, Debug)]
enum SolveError {
    #[error("reading parameter file: {0}")]
    Parameters(#[from] ParameterFileError),
    #[error("reading problem file: {0}")]
    Problem(#[from] ParserError),
    #[error("writing tour file: {0}")]
    TourFile(#[from] TourFileError),
    #[error("SUBPROBLEM_SIZE > 0 requires a subproblem partitioner, which this binary does not implement")]
    Unsupported,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match solve(&cli.parameter_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn solve(parameter_file: &std::path::Path) -> Result<(), SolveError> {
    // PROBLEM_FILE must be known before the instance (and thus its dimension) can be loaded, so
    // the parameter file is read once with a placeholder dimension purely to find it, then reread
    // once the real dimension is known so dimension-dependent defaults (MaxTrials, InitialPeriod)
    // resolve correctly.
    let preliminary = tsp_parser::params::parse_parameter_file(parameter_file, 1)?;
    if preliminary.subproblem_size > 0 {
        return Err(SolveError::Unsupported);
    }

    let instance: TSPInstance = tsp_parser::parse_tsp_instance(&preliminary.problem_file)?;
    let params: Parameters =
        tsp_parser::params::parse_parameter_file(parameter_file, instance.dimension())?;

    info!(
        "Loaded \"{}\": {} nodes",
        instance.metadata().name,
        instance.dimension()
    );

    let result = tsp_solvers::run(&instance, &params);
    info!(
        "Best tour found: cost {}, lower bound {}, {} runs, {} trials, {:.2}s",
        result.cost.0,
        result.stats.lower_bound.0,
        result.stats.runs_run,
        result.stats.trials_run,
        result.stats.elapsed.as_secs_f64()
    );

    let Some(tour) = &result.tour else {
        info!("MaxTrials == 0: no descent ran, no tour to write");
        return Ok(());
    };

    if let Some(output_path) = &params.output_tour_file {
        tsp_parser::tour_file::write_tour_file(
            output_path,
            &instance.metadata().name,
            tour.sequence(),
            Some(result.cost.0 as i64),
        )?;
        info!("Wrote tour to {output_path}");
    }

    Ok(())
}
