//! Domain model types for capacitated vehicle routing.
//!
//! Provides the core abstractions: nodes with coordinates and demands, an
//! immutable problem instance, routes as ordered customer sequences, and
//! solutions as sets of routes.

mod instance;
mod node;
mod route;
mod solution;

pub use instance::{Instance, InstanceError};
pub use node::Node;
pub use route::Route;
pub use solution::{Solution, Violation};
