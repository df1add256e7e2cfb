//! Delivery order optimizers.
//!
//! The planner reorders stops through the [`OrderOptimizer`] trait.  Both
//! implementations report the straight-line ("crow") length of the tour
//! before and after, depot → every stop in order → depot, so callers can spot
//! a reorder that made things worse.

use log::debug;

use nav_core::{DeliveryRequest, GeoCoord, distance_miles};

/// Crow-flight tour lengths before and after reordering, in miles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowDistances {
    pub old_miles: f64,
    pub new_miles: f64,
}

impl CrowDistances {
    /// Positive when the new order is shorter.
    pub fn saved_miles(&self) -> f64 {
        self.old_miles - self.new_miles
    }
}

/// Straight-line length of depot → `deliveries` in order → depot.
///
/// Zero for an empty slice.
pub fn crow_distance(depot: &GeoCoord, deliveries: &[DeliveryRequest]) -> f64 {
    let Some(last) = deliveries.last() else {
        return 0.0;
    };
    let mut total = 0.0;
    let mut here = depot;
    for d in deliveries {
        total += distance_miles(here, &d.location);
        here = &d.location;
    }
    total + distance_miles(&last.location, depot)
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Pluggable stop-ordering strategy.
pub trait OrderOptimizer {
    /// Reorder `deliveries` in place.  The result is a permutation of the
    /// input; individual requests are never modified.
    fn optimize(&self, depot: &GeoCoord, deliveries: &mut Vec<DeliveryRequest>) -> CrowDistances;
}

impl<O: OrderOptimizer + ?Sized> OrderOptimizer for &O {
    fn optimize(&self, depot: &GeoCoord, deliveries: &mut Vec<DeliveryRequest>) -> CrowDistances {
        (**self).optimize(depot, deliveries)
    }
}

// ── Implementations ───────────────────────────────────────────────────────────

/// Greedy nearest-neighbour tour.
///
/// Starting at the depot, repeatedly visit the closest unvisited stop.  Ties
/// go to the stop that came first in the input.  This is a heuristic: the
/// new tour can be longer than the original one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborOptimizer;

impl OrderOptimizer for NearestNeighborOptimizer {
    fn optimize(&self, depot: &GeoCoord, deliveries: &mut Vec<DeliveryRequest>) -> CrowDistances {
        let old_miles = crow_distance(depot, deliveries);

        // `remaining` keeps input order, so the first minimum found is the
        // lowest original index among ties.
        let mut remaining = std::mem::take(deliveries);
        deliveries.reserve(remaining.len());
        while !remaining.is_empty() {
            let here = deliveries.last().map_or(depot, |d| &d.location);
            let next = closest(here, &remaining);
            deliveries.push(remaining.remove(next));
        }

        let new_miles = crow_distance(depot, deliveries);
        debug!(
            "nearest-neighbour order over {} stops: {old_miles:.3} mi -> {new_miles:.3} mi",
            deliveries.len(),
        );
        CrowDistances { old_miles, new_miles }
    }
}

/// Keep the caller's order; only measure it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrder;

impl OrderOptimizer for InputOrder {
    fn optimize(&self, depot: &GeoCoord, deliveries: &mut Vec<DeliveryRequest>) -> CrowDistances {
        let d = crow_distance(depot, deliveries);
        CrowDistances { old_miles: d, new_miles: d }
    }
}

/// Index of the stop closest to `here`; the first one wins a tie.
fn closest(here: &GeoCoord, stops: &[DeliveryRequest]) -> usize {
    let mut best = 0;
    let mut best_miles = f64::INFINITY;
    for (i, stop) in stops.iter().enumerate() {
        let d = distance_miles(here, &stop.location);
        if d < best_miles {
            best = i;
            best_miles = d;
        }
    }
    best
}
