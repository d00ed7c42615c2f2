//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of customer visits served by one vehicle.
///
/// A route starts and ends at the depot (not stored in `customers`).
/// `load` is the sum of the visited customers' demands.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Route;
///
/// let mut route = Route::new();
/// route.push(3, 10);
/// route.push(1, 5);
/// assert_eq!(route.customers(), &[3, 1]);
/// assert_eq!(route.load(), 15);
/// assert_eq!(route.first(), Some(3));
/// assert_eq!(route.last(), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    customers: Vec<usize>,
    load: u32,
}

impl Route {
    /// Creates an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a route from a visit sequence and its precomputed load.
    pub fn from_parts(customers: Vec<usize>, load: u32) -> Self {
        Self { customers, load }
    }

    /// Appends a customer visit, adding its demand to the load.
    pub fn push(&mut self, customer: usize, demand: u32) {
        self.customers.push(customer);
        self.load += demand;
    }

    /// Appends all visits of `other` to the end of this route.
    pub fn append(&mut self, mut other: Route) {
        self.customers.append(&mut other.customers);
        self.load += other.load;
    }

    /// Reverses the visit order in place.
    pub fn reverse(&mut self) {
        self.customers.reverse();
    }

    /// Customer indices in visit order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customer visits (depot excluded).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Total demand carried on this route.
    pub fn load(&self) -> u32 {
        self.load
    }

    /// First customer visited after leaving the depot.
    pub fn first(&self) -> Option<usize> {
        self.customers.first().copied()
    }

    /// Last customer visited before returning to the depot.
    pub fn last(&self) -> Option<usize> {
        self.customers.last().copied()
    }
}
