//! Route evaluator that computes distance, load, and invariant violations.

use crate::models::{Instance, Route, Solution, Violation};

/// Evaluates routes and solutions against an instance.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Instance, Node};
/// use u_cvrp::evaluation::RouteEvaluator;
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(3.0, 4.0, 10),
///         Node::new(6.0, 8.0, 20),
///     ],
///     100,
///     0,
/// )
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let route = evaluator.build_route(&[1, 2]);
/// assert_eq!(route.load(), 30);
/// // 5 + 5 + 10
/// assert!((evaluator.route_distance(route.customers()) - 20.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Builds a route from a sequence of customer indices, computing its load.
    ///
    /// Indices outside the instance contribute no demand; use
    /// [`check_solution`](Self::check_solution) to detect them.
    pub fn build_route(&self, customers: &[usize]) -> Route {
        let load = customers
            .iter()
            .filter(|&&c| c < self.instance.num_nodes())
            .fold(0u32, |load, &c| load.saturating_add(self.instance.demand(c)));
        Route::from_parts(customers.to_vec(), load)
    }

    /// Distance of depot → customers → depot; 0 for an empty sequence.
    pub fn route_distance(&self, customers: &[usize]) -> f64 {
        let depot = self.instance.depot();
        let mut total = 0.0;
        let mut prev = depot;
        for &c in customers {
            total += self.instance.distance(prev, c);
            prev = c;
        }
        if !customers.is_empty() {
            total += self.instance.distance(prev, depot);
        }
        total
    }

    /// Sum of the route distances of `solution`.
    pub fn total_distance(&self, solution: &Solution) -> f64 {
        solution
            .routes()
            .iter()
            .map(|r| self.route_distance(r.customers()))
            .sum()
    }

    /// Checks the partition and capacity invariants.
    ///
    /// An empty result means every customer is visited exactly once and
    /// every route is non-empty and within capacity. Loads are recomputed
    /// from the instance's demands.
    pub fn check_solution(&self, solution: &Solution) -> Vec<Violation> {
        let n = self.instance.num_nodes();
        let depot = self.instance.depot();
        let capacity = self.instance.capacity();
        let mut visits = vec![0usize; n];
        let mut violations = Vec::new();

        for (route_index, route) in solution.routes().iter().enumerate() {
            if route.is_empty() {
                violations.push(Violation::EmptyRoute { route_index });
                continue;
            }

            let mut load: u64 = 0;
            for &node in route.customers() {
                if node >= n {
                    violations.push(Violation::UnknownNode { route_index, node });
                } else if node == depot {
                    violations.push(Violation::DepotVisited { route_index });
                } else {
                    visits[node] += 1;
                    load += u64::from(self.instance.demand(node));
                }
            }

            if load > u64::from(capacity) {
                violations.push(Violation::CapacityExceeded {
                    route_index,
                    load,
                    capacity,
                });
            }
        }

        for customer in self.instance.customers() {
            match visits[customer] {
                0 => violations.push(Violation::MissingCustomer { customer }),
                1 => {}
                _ => violations.push(Violation::DuplicateVisit { customer }),
            }
        }

        violations
    }
}

/// Total distance of a solution: per route, depot → first, consecutive
/// legs, last → depot.
pub fn score_solution(solution: &Solution, instance: &Instance) -> f64 {
    RouteEvaluator::new(instance).total_distance(solution)
}

/// Distance of a single depot-bounded route.
pub fn route_distance(instance: &Instance, customers: &[usize]) -> f64 {
    RouteEvaluator::new(instance).route_distance(customers)
}

/// Checks that `solution` partitions the customers of `instance` into
/// capacity-feasible routes. See [`RouteEvaluator::check_solution`].
pub fn check_solution(solution: &Solution, instance: &Instance) -> Vec<Violation> {
    RouteEvaluator::new(instance).check_solution(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn setup() -> Instance {
        Instance::new(
            vec![
                Node::depot(0.0, 0.0),
                Node::new(3.0, 4.0, 10),
                Node::new(6.0, 8.0, 20),
                Node::new(0.0, 10.0, 15),
            ],
            30,
            0,
        )
        .expect("valid")
    }

    fn solution(routes: &[&[usize]], instance: &Instance) -> Solution {
        let eval = RouteEvaluator::new(instance);
        Solution::from_routes(routes.iter().map(|r| eval.build_route(r)).collect())
    }

    #[test]
    fn test_route_distance_empty() {
        let inst = setup();
        assert_eq!(route_distance(&inst, &[]), 0.0);
    }

    #[test]
    fn test_route_distance_single() {
        let inst = setup();
        // depot->1 = 5.0, 1->depot = 5.0
        assert!((route_distance(&inst, &[1]) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_build_route_load() {
        let inst = setup();
        let route = RouteEvaluator::new(&inst).build_route(&[1, 2, 3]);
        assert_eq!(route.load(), 45);
        assert_eq!(route.customers(), &[1, 2, 3]);
    }

    #[test]
    fn test_score_solution() {
        let inst = setup();
        let sol = solution(&[&[1, 2], &[3]], &inst);
        // 5 + 5 + 10 and 10 + 10
        let score = score_solution(&sol, &inst);
        assert!((score - 40.0).abs() < 1e-10);
        assert_eq!(score, score_solution(&sol, &inst));
    }

    #[test]
    fn test_check_valid_solution() {
        let inst = setup();
        let sol = solution(&[&[1, 2], &[3]], &inst);
        assert!(check_solution(&sol, &inst).is_empty());
    }

    #[test]
    fn test_check_capacity_exceeded() {
        let inst = setup();
        let sol = solution(&[&[1, 2, 3]], &inst);
        assert_eq!(
            check_solution(&sol, &inst),
            vec![Violation::CapacityExceeded {
                route_index: 0,
                load: 45,
                capacity: 30,
            }]
        );
    }

    #[test]
    fn test_check_partition_violations() {
        let inst = setup();
        let sol = solution(&[&[1, 1], &[], &[0, 7]], &inst);
        let violations = check_solution(&sol, &inst);
        assert!(violations.contains(&Violation::EmptyRoute { route_index: 1 }));
        assert!(violations.contains(&Violation::DepotVisited { route_index: 2 }));
        assert!(violations.contains(&Violation::UnknownNode {
            route_index: 2,
            node: 7
        }));
        assert!(violations.contains(&Violation::DuplicateVisit { customer: 1 }));
        assert!(violations.contains(&Violation::MissingCustomer { customer: 2 }));
        assert!(violations.contains(&Violation::MissingCustomer { customer: 3 }));
        assert_eq!(violations.len(), 6);
    }

    #[test]
    fn test_non_zero_depot_distance() {
        let inst = Instance::new(
            vec![Node::new(3.0, 4.0, 1), Node::depot(0.0, 0.0)],
            10,
            1,
        )
        .expect("valid");
        assert!((route_distance(&inst, &[0]) - 10.0).abs() < 1e-10);
    }
}
