//! Solution scoring and invariant checking.

mod evaluator;

pub use evaluator::{check_solution, route_distance, score_solution, RouteEvaluator};
