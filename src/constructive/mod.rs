//! Constructive heuristics for building CVRP solutions.
//!
//! - [`nearest_neighbour`]: greedy nearest feasible customer, O(n²)
//! - [`savings`]: greedy route merging by best saving over four
//!   orientations, O(n³)
//!
//! Both reject an instance up front with
//! [`ConstructionError::InfeasibleDemand`] when some customer cannot fit in
//! an empty vehicle.

mod nearest_neighbour;
mod savings;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::models::{Instance, Solution};

pub use nearest_neighbour::nearest_neighbour;
pub use savings::{saving, savings, savings_with_history, MergeRecord, Orientation};

/// Reasons a constructor cannot produce a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("node {node} has demand {demand} which exceeds vehicle capacity {capacity}")]
    InfeasibleDemand { node: usize, demand: u32, capacity: u32 },
}

/// Selects one of the constructive heuristics.
///
/// # Examples
///
/// ```
/// use u_cvrp::constructive::Heuristic;
/// use u_cvrp::models::{Instance, Node};
///
/// let instance = Instance::new(
///     vec![Node::depot(0.0, 0.0), Node::new(1.0, 0.0, 1), Node::new(2.0, 0.0, 1)],
///     2,
///     0,
/// )
/// .unwrap();
///
/// for heuristic in Heuristic::ALL {
///     let solution = heuristic.build(&instance).unwrap();
///     assert_eq!(solution.num_served(), 2);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    NearestNeighbour,
    Savings,
}

impl Heuristic {
    /// Every heuristic, in reporting order.
    pub const ALL: [Heuristic; 2] = [Heuristic::NearestNeighbour, Heuristic::Savings];

    /// Runs this heuristic on `instance`.
    pub fn build(self, instance: &Instance) -> Result<Solution, ConstructionError> {
        match self {
            Heuristic::NearestNeighbour => nearest_neighbour(instance),
            Heuristic::Savings => savings(instance),
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::NearestNeighbour => "Nearest Neighbour",
            Heuristic::Savings => "Savings",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fails on the first customer whose demand exceeds the capacity.
fn check_demands(instance: &Instance) -> Result<(), ConstructionError> {
    let capacity = instance.capacity();
    match instance.customers().find(|&i| instance.demand(i) > capacity) {
        Some(node) => Err(ConstructionError::InfeasibleDemand {
            node,
            demand: instance.demand(node),
            capacity,
        }),
        None => Ok(()),
    }
}

/// Returns `true` if `demand` can be added to `load` without exceeding `capacity`.
fn fits(load: u32, demand: u32, capacity: u32) -> bool {
    load.checked_add(demand).is_some_and(|total| total <= capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    #[test]
    fn test_fits() {
        assert!(fits(0, 5, 5));
        assert!(fits(3, 2, 5));
        assert!(!fits(3, 3, 5));
        assert!(!fits(u32::MAX, 1, u32::MAX));
    }

    #[test]
    fn test_check_demands_reports_first_offender() {
        let instance = Instance::new(
            vec![
                Node::new(0.0, 0.0, 99),
                Node::new(1.0, 0.0, 3),
                Node::new(2.0, 0.0, 12),
                Node::new(3.0, 0.0, 15),
            ],
            10,
            0,
        )
        .expect("valid");
        assert_eq!(
            check_demands(&instance),
            Err(ConstructionError::InfeasibleDemand {
                node: 2,
                demand: 12,
                capacity: 10,
            })
        );
    }

    #[test]
    fn test_heuristic_display() {
        assert_eq!(Heuristic::NearestNeighbour.to_string(), "Nearest Neighbour");
        assert_eq!(Heuristic::Savings.to_string(), "Savings");
    }

    #[test]
    fn test_error_message() {
        let err = ConstructionError::InfeasibleDemand {
            node: 4,
            demand: 30,
            capacity: 20,
        };
        assert_eq!(
            err.to_string(),
            "node 4 has demand 30 which exceeds vehicle capacity 20"
        );
    }

    #[test]
    fn test_heuristic_serializes_kebab_case() {
        let json = serde_json::to_string(&Heuristic::ALL).expect("serializable");
        assert_eq!(json, r#"["nearest-neighbour","savings"]"#);
    }
}
