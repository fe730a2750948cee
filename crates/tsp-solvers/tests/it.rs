use std::io::Write;

use tempfile::NamedTempFile;
use tsp_core::{instance::distance::Distance, params::Parameters};
use tsp_parser::parse_tsp_instance;
use tsp_solvers::run::run;

/// A 5-city instance small enough for the optimal tour length to be known by inspection: it is
/// a unit pentagon, so the optimal tour is the pentagon itself.
const PENTAGON_TSP: &str = "\
NAME: pentagon
TYPE: TSP
COMMENT: regular pentagon, radius 1
DIMENSION: 5
EDGE_WEIGHT_TYPE: EUC_2D
NODE_COORD_SECTION
1 1.000 0.000
2 0.309 0.951
3 -0.809 0.588
4 -0.809 -0.588
5 0.309 -0.951
EOF
";

#[test]
fn end_to_end_solves_a_pentagon_instance_to_its_known_optimum() {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(PENTAGON_TSP.as_bytes()).expect("write fixture");

    let instance = parse_tsp_instance(file.path()).expect("parse pentagon instance");
    assert_eq!(instance.dimension(), 5);

    let mut params = Parameters::with_defaults(file.path().display().to_string(), instance.dimension());
    params.runs = 10;

    let result = run(&instance, &params);

    // Every side of the pentagon rounds to a distance of 1 and every diagonal rounds to 2, so the
    // optimal (and only sensible) tour walks the five vertices in order for a total cost of 5.
    assert_eq!(result.cost, Distance(5));
}
