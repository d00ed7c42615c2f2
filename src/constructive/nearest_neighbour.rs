//! Nearest-neighbour constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, always visit the nearest
//! unvisited customer that still fits in the vehicle. When nothing fits, the
//! vehicle returns to the depot and a new route starts.
//!
//! # Complexity
//!
//! O(n²) where n = number of customers.

use tracing::{debug, info, instrument};

use super::{check_demands, fits, ConstructionError};
use crate::models::{Instance, Route, Solution};

/// Constructs a CVRP solution using the nearest-neighbour heuristic.
///
/// The unvisited pool is scanned in ascending index order; among equally
/// close customers the first one scanned wins. A vehicle whose load has
/// reached capacity is closed without scanning. No empty route is ever
/// emitted, and an instance without customers yields an empty solution.
///
/// # Errors
///
/// [`ConstructionError::InfeasibleDemand`] if some customer's demand
/// exceeds the vehicle capacity.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Instance, Node};
/// use u_cvrp::constructive::nearest_neighbour;
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(1.0, 0.0, 10),
///         Node::new(2.0, 0.0, 10),
///         Node::new(3.0, 0.0, 10),
///     ],
///     20,
///     0,
/// )
/// .unwrap();
///
/// let solution = nearest_neighbour(&instance).unwrap();
/// assert_eq!(solution.routes()[0].customers(), &[1, 2]);
/// assert_eq!(solution.routes()[1].customers(), &[3]);
/// ```
#[instrument(
    skip_all,
    fields(customers = instance.num_customers(), capacity = instance.capacity())
)]
pub fn nearest_neighbour(instance: &Instance) -> Result<Solution, ConstructionError> {
    check_demands(instance)?;

    let capacity = instance.capacity();
    let depot = instance.depot();

    let mut unvisited: Vec<usize> = instance.customers().collect();
    let mut solution = Solution::new();
    let mut route = Route::new();
    let mut current = depot;

    while !unvisited.is_empty() {
        let load = route.load();
        let nearest = if load < capacity || route.is_empty() {
            let feasible = unvisited
                .iter()
                .copied()
                .filter(|&i| fits(load, instance.demand(i), capacity));
            instance.distances().nearest(current, feasible)
        } else {
            None
        };

        match nearest {
            Some((next, _)) => {
                unvisited.retain(|&i| i != next);
                route.push(next, instance.demand(next));
                current = next;
            }
            None => {
                // An empty vehicle that fits nothing means every remaining
                // customer is oversized.
                if route.is_empty() {
                    let node = unvisited[0];
                    return Err(ConstructionError::InfeasibleDemand {
                        node,
                        demand: instance.demand(node),
                        capacity,
                    });
                }
                debug!(
                    stops = route.len(),
                    load = route.load(),
                    remaining = unvisited.len(),
                    "closing route"
                );
                solution.add_route(std::mem::take(&mut route));
                current = depot;
            }
        }
    }

    if !route.is_empty() {
        solution.add_route(route);
    }

    info!(routes = solution.num_routes(), "nearest neighbour finished");
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{check_solution, score_solution};
    use crate::models::Node;

    fn line_instance(demand: u32, capacity: u32) -> Instance {
        Instance::new(
            vec![
                Node::depot(0.0, 0.0),
                Node::new(1.0, 0.0, demand),
                Node::new(2.0, 0.0, demand),
                Node::new(3.0, 0.0, demand),
            ],
            capacity,
            0,
        )
        .expect("valid")
    }

    fn square_instance() -> Instance {
        Instance::new(
            vec![
                Node::depot(0.0, 0.0),
                Node::new(0.0, 5.0, 1),
                Node::new(5.0, 0.0, 1),
                Node::new(0.0, -5.0, 1),
                Node::new(-5.0, 0.0, 1),
            ],
            2,
            0,
        )
        .expect("valid")
    }

    #[test]
    fn test_nn_all_on_one_route() {
        let inst = line_instance(10, 100);
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].customers(), &[1, 2, 3]);
        // 0→1 + 1→2 + 2→3 + 3→0 = 1 + 1 + 1 + 3 = 6
        assert!((score_solution(&sol, &inst) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_nn_split_routes() {
        let inst = line_instance(10, 20);
        let sol = nearest_neighbour(&inst).expect("feasible");
        // Capacity 20: first route takes 1, 2 (20), second takes 3 (10)
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].customers(), &[1, 2]);
        assert_eq!(sol.routes()[1].customers(), &[3]);
        assert_eq!(sol.routes()[0].load(), 20);
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let inst = Instance::new(
            vec![
                Node::depot(0.0, 0.0),
                Node::new(10.0, 0.0, 5),
                Node::new(1.0, 0.0, 5),
            ],
            100,
            0,
        )
        .expect("valid");
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.routes()[0].customers(), &[2, 1]);
    }

    #[test]
    fn test_nn_skips_customer_that_does_not_fit() {
        // From 1 the nearest is 2, but it no longer fits; 3 does.
        let inst = Instance::new(
            vec![
                Node::depot(0.0, 0.0),
                Node::new(1.0, 0.0, 5),
                Node::new(2.0, 0.0, 8),
                Node::new(5.0, 0.0, 2),
            ],
            10,
            0,
        )
        .expect("valid");
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.routes()[0].customers(), &[1, 3]);
        assert_eq!(sol.routes()[1].customers(), &[2]);
    }

    #[test]
    fn test_nn_square_scenario() {
        let inst = square_instance();
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.num_routes(), 2);
        assert!(sol.routes().iter().all(|r| r.len() == 2));
        // All four customers are at distance 5 from the depot; ties go to
        // the lowest index, then 1 → 2 and 1 → 4 are equally close.
        assert_eq!(sol.routes()[0].customers(), &[1, 2]);
        assert_eq!(sol.routes()[1].customers(), &[3, 4]);
        let expected = 2.0 * (5.0 + 50f64.sqrt() + 5.0);
        assert!((score_solution(&sol, &inst) - expected).abs() < 1e-10);
        assert!(check_solution(&sol, &inst).is_empty());
    }

    #[test]
    fn test_nn_no_trailing_empty_route_when_last_vehicle_is_full() {
        // The last vehicle is filled exactly to capacity by the last customer.
        let inst = line_instance(1, 3);
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].load(), 3);
        assert!(sol.routes().iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_nn_full_vehicle_closes_route() {
        let inst = line_instance(2, 2);
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.num_routes(), 3);
        assert!(sol.routes().iter().all(|r| r.len() == 1 && r.load() == 2));
    }

    #[test]
    fn test_nn_zero_capacity_zero_demand() {
        // A vehicle at capacity is closed even if zero-demand customers remain.
        let inst = line_instance(0, 0);
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.num_served(), 3);
    }

    #[test]
    fn test_nn_empty() {
        let inst = Instance::new(vec![Node::depot(0.0, 0.0)], 100, 0).expect("valid");
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.num_routes(), 0);
    }

    #[test]
    fn test_nn_non_zero_depot() {
        let inst = Instance::new(
            vec![
                Node::new(1.0, 0.0, 1),
                Node::depot(0.0, 0.0),
                Node::new(-2.0, 0.0, 1),
            ],
            5,
            1,
        )
        .expect("valid");
        let sol = nearest_neighbour(&inst).expect("feasible");
        assert_eq!(sol.routes()[0].customers(), &[0, 2]);
    }

    #[test]
    fn test_nn_infeasible_demand() {
        let inst = Instance::new(
            vec![Node::depot(0.0, 0.0), Node::new(1.0, 1.0, 11)],
            10,
            0,
        )
        .expect("valid");
        assert_eq!(
            nearest_neighbour(&inst),
            Err(ConstructionError::InfeasibleDemand {
                node: 1,
                demand: 11,
                capacity: 10,
            })
        );
    }
}
