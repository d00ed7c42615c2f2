//! Savings constructive heuristic.
//!
//! # Algorithm
//!
//! Starts with each customer on its own route (depot → customer → depot).
//! Each iteration scans every ordered pair of routes whose combined load
//! fits the vehicle, tries four ways of joining them end to end, and merges
//! the single pair with the largest saving:
//!
//! ```text
//! s(i, j) = d(i, 0) + d(0, j) - d(i, j)
//! ```
//!
//! where `i` is the last customer of the first sequence and `j` the first
//! customer of the second. Only strictly positive savings are accepted; the
//! process stops when no pair improves.
//!
//! Unlike the classic Clarke-Wright formulation, savings are recomputed
//! against the current route ends on every iteration instead of being
//! sorted once up front.
//!
//! # Complexity
//!
//! O(n³) where n = number of customers: at most n − 1 merges, each scanning
//! O(r²) route pairs.

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::{check_demands, fits, ConstructionError};
use crate::models::{Instance, Route, Solution};

/// Distance saved by travelling `first → second` directly instead of
/// `first → depot → second`.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Instance, Node};
/// use u_cvrp::constructive::saving;
///
/// let instance = Instance::new(
///     vec![Node::depot(0.0, 0.0), Node::new(3.0, 0.0, 1), Node::new(4.0, 0.0, 1)],
///     10,
///     0,
/// )
/// .unwrap();
/// // 3 + 4 - 1
/// assert!((saving(&instance, 1, 2) - 6.0).abs() < 1e-10);
/// ```
pub fn saving(instance: &Instance, first: usize, second: usize) -> f64 {
    let depot = instance.depot();
    instance.distance(first, depot) + instance.distance(depot, second)
        - instance.distance(first, second)
}

/// How two routes are joined, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Tail of route to head of other: `route + other`.
    RouteThenOther,
    /// Tail of other to head of route: `other + route`.
    OtherThenRoute,
    /// Head of route to head of other: `reverse(route) + other`.
    ReversedRouteThenOther,
    /// Tail of route to tail of other: `route + reverse(other)`.
    RouteThenReversedOther,
}

impl Orientation {
    /// All orientations in evaluation order.
    pub const ALL: [Orientation; 4] = [
        Orientation::RouteThenOther,
        Orientation::OtherThenRoute,
        Orientation::ReversedRouteThenOther,
        Orientation::RouteThenReversedOther,
    ];

    /// The `(last of first sequence, first of second sequence)` pair this
    /// orientation would connect. `None` if either route is empty.
    fn connection(self, route: &Route, other: &Route) -> Option<(usize, usize)> {
        match self {
            Orientation::RouteThenOther => Some((route.last()?, other.first()?)),
            Orientation::OtherThenRoute => Some((other.last()?, route.first()?)),
            Orientation::ReversedRouteThenOther => Some((route.first()?, other.first()?)),
            Orientation::RouteThenReversedOther => Some((route.last()?, other.last()?)),
        }
    }

    /// Joins the two routes into one.
    fn join(self, mut route: Route, mut other: Route) -> Route {
        match self {
            Orientation::RouteThenOther => {
                route.append(other);
                route
            }
            Orientation::OtherThenRoute => {
                other.append(route);
                other
            }
            Orientation::ReversedRouteThenOther => {
                route.reverse();
                route.append(other);
                route
            }
            Orientation::RouteThenReversedOther => {
                other.reverse();
                route.append(other);
                route
            }
        }
    }
}

/// One accepted merge of the savings heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergeRecord {
    /// Last customer of the first joined sequence.
    pub first: usize,
    /// First customer of the second joined sequence.
    pub second: usize,
    /// Saving of the connection; always strictly positive.
    pub saving: f64,
    pub orientation: Orientation,
    /// Load of the merged route.
    pub load: u32,
}

/// Stable handle to a route in [`WorkingRoutes`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RouteId(usize);

/// Best merge found during one scan.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    route: RouteId,
    other: RouteId,
    orientation: Orientation,
    first: usize,
    second: usize,
    saving: f64,
}

/// Routes under construction. Every route ever built owns an arena slot;
/// `live` lists the ids still in play, untouched singletons first and merged
/// routes appended at the end.
struct WorkingRoutes {
    slots: Vec<Option<Route>>,
    live: Vec<RouteId>,
}

impl WorkingRoutes {
    fn singletons(instance: &Instance) -> Self {
        let slots: Vec<Option<Route>> = instance
            .customers()
            .map(|i| Some(Route::from_parts(vec![i], instance.demand(i))))
            .collect();
        let live = (0..slots.len()).map(RouteId).collect();
        Self { slots, live }
    }

    fn get(&self, id: RouteId) -> Option<&Route> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn live_routes(&self) -> impl Iterator<Item = (RouteId, &Route)> + '_ {
        self.live
            .iter()
            .filter_map(move |&id| self.get(id).map(|route| (id, route)))
    }

    /// Scans every ordered pair of live routes and orientation for the
    /// largest strictly positive saving. The first candidate reaching the
    /// maximum is kept.
    fn best_merge(&self, instance: &Instance) -> Option<Candidate> {
        let capacity = instance.capacity();
        let mut best: Option<Candidate> = None;

        for (r, route) in self.live_routes() {
            for (o, other) in self.live_routes() {
                if r == o || !fits(route.load(), other.load(), capacity) {
                    continue;
                }
                for orientation in Orientation::ALL {
                    let Some((first, second)) = orientation.connection(route, other) else {
                        continue;
                    };
                    let value = saving(instance, first, second);
                    if value > best.map_or(0.0, |b| b.saving) {
                        best = Some(Candidate {
                            route: r,
                            other: o,
                            orientation,
                            first,
                            second,
                            saving: value,
                        });
                    }
                }
            }
        }

        best
    }

    /// Replaces the candidate's two routes by their join under a fresh id.
    /// Returns `None` if either id is no longer live.
    fn merge(&mut self, candidate: Candidate) -> Option<MergeRecord> {
        let route = self.slots.get_mut(candidate.route.0)?.take()?;
        let Some(other) = self.slots.get_mut(candidate.other.0).and_then(Option::take) else {
            self.slots[candidate.route.0] = Some(route);
            return None;
        };

        let merged = candidate.orientation.join(route, other);
        let record = MergeRecord {
            first: candidate.first,
            second: candidate.second,
            saving: candidate.saving,
            orientation: candidate.orientation,
            load: merged.load(),
        };

        let id = RouteId(self.slots.len());
        self.slots.push(Some(merged));
        self.live.retain(|&kept| kept != candidate.route && kept != candidate.other);
        self.live.push(id);
        Some(record)
    }

    fn into_solution(mut self) -> Solution {
        let routes = self
            .live
            .iter()
            .filter_map(|id| self.slots.get_mut(id.0).and_then(Option::take))
            .collect();
        Solution::from_routes(routes)
    }
}

/// Constructs a CVRP solution using the savings heuristic.
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
/// use u_cvrp::constructive::savings;
///
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0),
///         Node::new(1.0, 0.0, 10),
///         Node::new(2.0, 0.0, 10),
///         Node::new(3.0, 0.0, 10),
///     ],
///     30,
///     0,
/// )
/// .unwrap();
///
/// let solution = savings(&instance).unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.routes()[0].customers(), &[1, 2, 3]);
/// ```
pub fn savings(instance: &Instance) -> Result<Solution, ConstructionError> {
    savings_with_history(instance).map(|(solution, _)| solution)
}

/// Like [`savings`], also returning every accepted merge in order.
#[instrument(
    skip_all,
    fields(customers = instance.num_customers(), capacity = instance.capacity())
)]
pub fn savings_with_history(
    instance: &Instance,
) -> Result<(Solution, Vec<MergeRecord>), ConstructionError> {
    check_demands(instance)?;

    let mut working = WorkingRoutes::singletons(instance);
    let mut history = Vec::new();

    while let Some(record) = working
        .best_merge(instance)
        .and_then(|candidate| working.merge(candidate))
    {
        debug!(
            first = record.first,
            second = record.second,
            saving = record.saving,
            orientation = ?record.orientation,
            load = record.load,
            routes = working.len(),
            "merged routes"
        );
        history.push(record);
    }

    let solution = working.into_solution();
    info!(
        routes = solution.num_routes(),
        merges = history.len(),
        "savings finished"
    );
    Ok((solution, history))
}
