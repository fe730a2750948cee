//! Parameter-file reader: `KEY = VALUE` lines (case-insensitive keys, `#`-prefixed comments),
//! producing a [`Parameters`] with every unset key defaulted once `DIMENSION` is known.

use std::{fs, path::Path, str::FromStr};

use thiserror::Error;
use tsp_core::params::{InitialTourAlgorithm, MoveType, Parameters};

#[derive(Error, Debug)]
pub enum ParameterFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("missing required key PROBLEM_FILE")]
    MissingProblemFile,
    #[error("{file}:{line}: unknown parameter key: {key}")]
    UnknownKey {
        file: String,
        line: usize,
        key: String,
    },
    #[error("{file}:{line}: invalid value for {key}: {value}")]
    InvalidValue {
        file: String,
        line: usize,
        key: String,
        value: String,
    },
}

/// Parses a parameter file, defaulting unset keys against `dimension` (the problem's node count,
/// read from the instance named by `PROBLEM_FILE` before this function can be fully resolved by a
/// caller that needs `MaxTrials`'s default to reflect the actual instance size).
pub fn parse_parameter_file<P: AsRef<Path>>(
    path: P,
    dimension: usize,
) -> Result<Parameters, ParameterFileError> {
    let file = path.as_ref().display().to_string();
    let content = fs::read_to_string(path.as_ref())?;
    let mut problem_file = None;
    let mut params = Parameters::with_defaults(String::new(), dimension);

    for (line_index, raw_line) in content.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(2, '=');
        let key = parts
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();
        let value = parts
            .next()
            .ok_or_else(|| ParameterFileError::InvalidValue {
                file: file.clone(),
                line: line_number,
                key: key.clone(),
                value: String::new(),
            })?
            .trim();

        match key.as_str() {
            "PROBLEM_FILE" => problem_file = Some(value.to_string()),
            "OUTPUT_TOUR_FILE" => params.output_tour_file = Some(value.to_string()),
            "TOUR_FILE" => params.tour_file = Some(value.to_string()),
            "RUNS" => params.runs = parse_value(&file, line_number, &key, value)?,
            "MAX_TRIALS" => params.max_trials = parse_value(&file, line_number, &key, value)?,
            "MAX_CANDIDATES" => {
                params.max_candidates = parse_value(&file, line_number, &key, value)?
            }
            "MOVE_TYPE" => params.move_type = parse_move_type(&file, line_number, &key, value)?,
            "BACKTRACKING" => {
                params.backtracking = parse_bool(&file, line_number, &key, value)?
            }
            "PRECISION" => params.precision = parse_value(&file, line_number, &key, value)?,
            "SEED" => params.seed = parse_value(&file, line_number, &key, value)?,
            "TIME_LIMIT" => params.time_limit = parse_value(&file, line_number, &key, value)?,
            "POPULATION_SIZE" => {
                params.population_size = parse_value(&file, line_number, &key, value)?
            }
            "MAX_POPULATION_SIZE" => {
                params.max_population_size = parse_value(&file, line_number, &key, value)?
            }
            "STOP_AT_OPTIMUM" => {
                params.stop_at_optimum = parse_bool(&file, line_number, &key, value)?
            }
            "OPTIMUM" => params.optimum = Some(parse_value(&file, line_number, &key, value)?),
            "INITIAL_PERIOD" => {
                params.initial_period = parse_value(&file, line_number, &key, value)?
            }
            "INITIAL_TOUR_ALGORITHM" => {
                params.initial_tour_algorithm =
                    parse_initial_tour_algorithm(&file, line_number, &key, value)?
            }
            "SUBPROBLEM_SIZE" => {
                params.subproblem_size = parse_value(&file, line_number, &key, value)?
            }
            _ => {
                return Err(ParameterFileError::UnknownKey {
                    file,
                    line: line_number,
                    key,
                });
            }
        }
    }

    params.problem_file = problem_file.ok_or(ParameterFileError::MissingProblemFile)?;
    Ok(params)
}

fn parse_value<T: FromStr>(
    file: &str,
    line: usize,
    key: &str,
    value: &str,
) -> Result<T, ParameterFileError> {
    value.parse().map_err(|_| ParameterFileError::InvalidValue {
        file: file.to_string(),
        line,
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(file: &str, line: usize, key: &str, value: &str) -> Result<bool, ParameterFileError> {
    match value.to_ascii_uppercase().as_str() {
        "YES" | "TRUE" | "1" => Ok(true),
        "NO" | "FALSE" | "0" => Ok(false),
        _ => Err(ParameterFileError::InvalidValue {
            file: file.to_string(),
            line,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_move_type(
    file: &str,
    line: usize,
    key: &str,
    value: &str,
) -> Result<MoveType, ParameterFileError> {
    match value {
        "2" => Ok(MoveType::TwoOpt),
        "3" => Ok(MoveType::ThreeOpt),
        "4" => Ok(MoveType::FourOpt),
        "5" => Ok(MoveType::FiveOpt),
        _ => Err(ParameterFileError::InvalidValue {
            file: file.to_string(),
            line,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_initial_tour_algorithm(
    file: &str,
    line: usize,
    key: &str,
    value: &str,
) -> Result<InitialTourAlgorithm, ParameterFileError> {
    match value.to_ascii_uppercase().as_str() {
        "WALK" => Ok(InitialTourAlgorithm::Walk),
        "NEAREST_NEIGHBOR" => Ok(InitialTourAlgorithm::NearestNeighbor),
        "GREEDY" => Ok(InitialTourAlgorithm::Greedy),
        "BORUVKA" => Ok(InitialTourAlgorithm::Boruvka),
        "RANDOM" => Ok(InitialTourAlgorithm::Random),
        _ => Err(ParameterFileError::InvalidValue {
            file: file.to_string(),
            line,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_minimal_parameter_file() {
        let file = write_temp_file("PROBLEM_FILE = berlin52.tsp\nRUNS = 3\n# a comment\n");
        let params = parse_parameter_file(file.path(), 52).unwrap();
        assert_eq!(params.problem_file, "berlin52.tsp");
        assert_eq!(params.runs, 3);
        assert_eq!(params.max_trials, 52);
    }

    #[test]
    fn unknown_key_is_fatal() {
        let file = write_temp_file("PROBLEM_FILE = a.tsp\nNOT_A_REAL_KEY = 1\n");
        match parse_parameter_file(file.path(), 1) {
            Err(ParameterFileError::UnknownKey { line, key, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(key, "NOT_A_REAL_KEY");
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn missing_problem_file_is_fatal() {
        let file = write_temp_file("RUNS = 3\n");
        assert!(matches!(
            parse_parameter_file(file.path(), 1),
            Err(ParameterFileError::MissingProblemFile)
        ));
    }
}
