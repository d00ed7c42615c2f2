//! Solution and violation types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Route;

/// A broken solution invariant, reported by
/// [`check_solution`](crate::evaluation::check_solution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Route load exceeds the vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Sum of the route's customer demands.
        load: u64,
        /// Vehicle capacity.
        capacity: u32,
    },
    /// Route visits no customer.
    EmptyRoute { route_index: usize },
    /// Route lists the depot as a customer.
    DepotVisited { route_index: usize },
    /// Route lists an index outside the instance.
    UnknownNode { route_index: usize, node: usize },
    /// Customer appears more than once across the solution.
    DuplicateVisit { customer: usize },
    /// Customer appears in no route.
    MissingCustomer { customer: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CapacityExceeded {
                route_index,
                load,
                capacity,
            } => write!(
                f,
                "route {route_index} carries {load} which exceeds capacity {capacity}"
            ),
            Violation::EmptyRoute { route_index } => write!(f, "route {route_index} is empty"),
            Violation::DepotVisited { route_index } => {
                write!(f, "route {route_index} visits the depot")
            }
            Violation::UnknownNode { route_index, node } => {
                write!(f, "route {route_index} visits unknown node {node}")
            }
            Violation::DuplicateVisit { customer } => {
                write!(f, "customer {customer} is visited more than once")
            }
            Violation::MissingCustomer { customer } => {
                write!(f, "customer {customer} is not visited")
            }
        }
    }
}

/// A set of routes produced by a constructor or read from a file.
///
/// A valid solution visits every customer of its instance exactly once and
/// keeps every route within capacity; use
/// [`check_solution`](crate::evaluation::check_solution) to verify.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_parts(vec![1, 2], 2));
/// sol.add_route(Route::from_parts(vec![3], 1));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a solution from the given routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// All visited customer indices, route by route.
    pub fn visits(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes.iter().flat_map(|r| r.customers().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.visits().count(), 0);
    }

    #[test]
    fn test_solution_with_routes() {
        let sol = Solution::from_routes(vec![
            Route::from_parts(vec![1], 10),
            Route::from_parts(vec![2, 3], 15),
        ]);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.visits().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation::CapacityExceeded {
            route_index: 0,
            load: 250,
            capacity: 200,
        };
        assert_eq!(v.to_string(), "route 0 carries 250 which exceeds capacity 200");
        assert_eq!(
            Violation::MissingCustomer { customer: 7 }.to_string(),
            "customer 7 is not visited"
        );
    }

    #[test]
    fn test_solution_serializes() {
        let sol = Solution::from_routes(vec![Route::from_parts(vec![2, 1], 3)]);
        let json = serde_json::to_string(&sol).expect("serializable");
        assert_eq!(json, r#"{"routes":[{"customers":[2,1],"load":3}]}"#);
    }
}
