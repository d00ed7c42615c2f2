//! Node type: a depot or customer location with a demand.

use serde::{Deserialize, Serialize};

/// A location in a routing problem.
///
/// Nodes are identified by their position in the instance's node list. The
/// node at the instance's depot index is the depot; its demand is ignored.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Node;
///
/// let depot = Node::depot(35.0, 35.0);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Node::new(41.0, 49.0, 10);
/// assert_eq!(c.demand(), 10);
/// assert!((depot.distance_to(&Node::new(38.0, 39.0, 0)) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    x: f64,
    y: f64,
    demand: u32,
}

impl Node {
    /// Creates a node at `(x, y)` with the given demand.
    pub fn new(x: f64, y: f64, demand: u32) -> Self {
        Self { x, y, demand }
    }

    /// Creates a zero-demand node, for use as the depot.
    pub fn depot(x: f64, y: f64) -> Self {
        Self::new(x, y, 0)
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Units this node requires from the vehicle serving it.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
