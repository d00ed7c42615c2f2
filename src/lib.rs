//! # u-cvrp
//!
//! Capacitated vehicle routing construction heuristics: a greedy
//! nearest-neighbour tour builder and an iterative savings merger, with
//! CVRPLIB instance and solution I/O.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Node, Instance, Route, Solution)
//! - [`distance`]: Euclidean distance matrix
//! - [`constructive`]: Nearest-neighbour and savings heuristics
//! - [`evaluation`]: Solution scoring and invariant checking
//! - [`io`]: CVRPLIB `.vrp` and `.sol` readers and writers
//! - [`generate`]: Seeded random instances
//! - [`render`]: SVG plots of solutions
//!
//! ## Example
//!
//! ```
//! use u_cvrp::constructive::{nearest_neighbour, savings};
//! use u_cvrp::evaluation::{check_solution, score_solution};
//! use u_cvrp::models::{Instance, Node};
//!
//! let instance = Instance::new(
//!     vec![
//!         Node::depot(0.0, 0.0),
//!         Node::new(0.0, 5.0, 1),
//!         Node::new(5.0, 0.0, 1),
//!         Node::new(0.0, -5.0, 1),
//!         Node::new(-5.0, 0.0, 1),
//!     ],
//!     2,
//!     0,
//! )
//! .unwrap();
//!
//! for solution in [nearest_neighbour(&instance).unwrap(), savings(&instance).unwrap()] {
//!     assert!(check_solution(&solution, &instance).is_empty());
//!     assert_eq!(solution.num_routes(), 2);
//!     assert!(score_solution(&solution, &instance) < 40.0);
//! }
//! ```

pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod generate;
pub mod io;
pub mod models;
pub mod render;
