/*!
This crate provides the solver side of a Lin-Kernighan-style TSP heuristic: a Held-Karp
subgradient ascent for lower bounds and candidate edges, a handful of initial tour constructions,
the sequential variable-depth local search itself, and the outer run/population driver that ties
them together. Explanations and references for each algorithm can be found in their respective
modules.
*/

pub mod ascent;
pub mod crossover;
pub mod hash_filter;
pub mod initial_tour;
pub mod lk;
pub mod merge;
pub mod one_tree;
pub mod run;
pub mod trial;

pub use run::{RunResult, run};
