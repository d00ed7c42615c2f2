//! Problem instance: nodes, vehicle capacity and depot.

use thiserror::Error;

use super::Node;
use crate::distance::DistanceMatrix;

/// Reasons an instance cannot be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    #[error("instance has no nodes")]
    NoNodes,

    #[error("depot index {depot} is out of range for {len} nodes")]
    DepotOutOfRange { depot: usize, len: usize },

    #[error("node {node} has a non-finite coordinate")]
    NonFiniteCoordinate { node: usize },
}

/// A capacitated vehicle routing problem instance.
///
/// Immutable once built. The Euclidean distance matrix is computed on
/// construction, so [`Instance::distance`] is a table lookup.
///
/// Customer demands above the capacity are accepted here; the constructors
/// reject such instances with
/// [`ConstructionError::InfeasibleDemand`](crate::constructive::ConstructionError).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Instance, Node};
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
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.customers().collect::<Vec<_>>(), vec![1, 2]);
/// assert!((instance.distance(0, 1) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: Option<String>,
    nodes: Vec<Node>,
    capacity: u32,
    depot: usize,
    distances: DistanceMatrix,
}

impl Instance {
    /// Builds an instance, validating the depot index and coordinates.
    pub fn new(nodes: Vec<Node>, capacity: u32, depot: usize) -> Result<Self, InstanceError> {
        if nodes.is_empty() {
            return Err(InstanceError::NoNodes);
        }
        if depot >= nodes.len() {
            return Err(InstanceError::DepotOutOfRange {
                depot,
                len: nodes.len(),
            });
        }
        if let Some(node) = nodes.iter().position(|n| !n.is_finite()) {
            return Err(InstanceError::NonFiniteCoordinate { node });
        }

        let distances = DistanceMatrix::from_nodes(&nodes);
        Ok(Self {
            name: None,
            nodes,
            capacity,
            depot,
            distances,
        })
    }

    /// Attaches a display name (e.g. the CVRPLIB `NAME` field).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Instance name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// All nodes, depot included, in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Total number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of customers (nodes other than the depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Depot index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Customer indices in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&i| i != self.depot)
    }

    /// Demand of node `index`; always 0 for the depot.
    pub fn demand(&self, index: usize) -> u32 {
        if index == self.depot {
            0
        } else {
            self.nodes[index].demand()
        }
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> u64 {
        self.customers().map(|i| u64::from(self.demand(i))).sum()
    }

    /// Euclidean distance between nodes `from` and `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}
