//! CVRPLIB solution listings.
//!
//! ```text
//! Route #1: 21 31 19 17 13 7 26
//! Route #2: 12 1 16 30
//! Cost 784
//! ```
//!
//! Route entries are node indices with the depot at index 0, matching the
//! numbering of CVRPLIB reference solutions.

use std::fmt::Write as _;

use super::ReadError;
use crate::evaluation::RouteEvaluator;
use crate::models::{Instance, Solution};

/// A parsed solution listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionFile {
    /// Visit sequences, one per route.
    pub routes: Vec<Vec<usize>>,
    /// Cost stated in the file, if any.
    pub cost: Option<f64>,
}

impl SolutionFile {
    /// Builds a [`Solution`], computing each route's load from `instance`.
    pub fn to_solution(&self, instance: &Instance) -> Solution {
        let evaluator = RouteEvaluator::new(instance);
        Solution::from_routes(self.routes.iter().map(|r| evaluator.build_route(r)).collect())
    }
}

/// Parses a solution listing.
///
/// # Examples
///
/// ```
/// use u_cvrp::io::parse_solution;
///
/// let file = parse_solution("Route #1: 2 1\nRoute #2: 3\nCost 42\n").unwrap();
/// assert_eq!(file.routes, vec![vec![2, 1], vec![3]]);
/// assert_eq!(file.cost, Some(42.0));
/// ```
pub fn parse_solution(text: &str) -> Result<SolutionFile, ReadError> {
    let mut file = SolutionFile::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Route") {
            let (_, visits) = rest.split_once(':').ok_or_else(|| {
                ReadError::malformed(line_no, format!("expected 'Route #k: ...', got: '{line}'"))
            })?;
            let route = visits
                .split_whitespace()
                .map(|v| {
                    v.parse::<usize>().map_err(|err| {
                        ReadError::malformed(line_no, format!("cannot parse node '{v}': {err}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            file.routes.push(route);
        } else if let Some(rest) = line.strip_prefix("Cost") {
            let cost = rest.trim().parse::<f64>().map_err(|err| {
                ReadError::malformed(line_no, format!("cannot parse cost '{}': {err}", rest.trim()))
            })?;
            file.cost = Some(cost);
        } else {
            return Err(ReadError::malformed(line_no, format!("unexpected line: '{line}'")));
        }
    }

    Ok(file)
}

/// Formats a solution as a listing readable by [`parse_solution`].
pub fn format_solution(solution: &Solution, cost: Option<f64>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_solution(solution, cost, &mut out);
    out
}

fn write_solution(solution: &Solution, cost: Option<f64>, out: &mut String) -> std::fmt::Result {
    for (i, route) in solution.routes().iter().enumerate() {
        write!(out, "Route #{}:", i + 1)?;
        for c in route.customers() {
            write!(out, " {c}")?;
        }
        writeln!(out)?;
    }
    if let Some(cost) = cost {
        writeln!(out, "Cost {cost}")?;
    }
    Ok(())
}
