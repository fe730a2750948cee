//! Core data types shared by the TSP parser and solvers: instances, distances, the candidate-edge
//! model, and the tour representation used by the local search.

pub mod candidate;
pub mod instance;
pub mod params;
pub mod stats;
pub mod tour;
pub mod tsp_lib_spec;
