//! Multi-leg delivery planning and narration.
//!
//! # Legs
//!
//! For `n` deliveries the planner routes `n + 1` legs, in this order:
//!
//! ```text
//! depot → deliveries[0]            (caller's first delivery)
//! stops[i] → stops[i + 1]          (optimized order, i = 0 .. n-2)
//! stops[n-1] → depot
//! ```
//!
//! The first routing failure aborts the whole plan and is returned as is.
//!
//! # Narration
//!
//! Within a leg, consecutive segments on the same street merge into one
//! `Proceed`.  When the street name changes, a `Turn` onto the new street is
//! emitted (unless the heading change is under 1°), followed by the
//! `Proceed` for the street just left.  The last run of each leg is always
//! flushed.  Every leg except the final return to the depot ends with a
//! `Deliver`.

use log::{debug, info};

use nav_core::{DeliveryRequest, GeoCoord, StreetSegment, angle_between};
use nav_spatial::{BfsRouter, Route, Router, StreetMap};

use crate::command::{Command, Direction, TurnSide};
use crate::optimizer::{CrowDistances, NearestNeighborOptimizer, OrderOptimizer};
use crate::PlanResult;

// ── DeliveryPlan ──────────────────────────────────────────────────────────────

/// A finished plan.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPlan {
    pub commands: Vec<Command>,
    /// Sum of the lengths of every routed segment, in miles.
    pub distance_miles: f64,
    /// Deliveries in the order they are handed over.
    pub stops: Vec<DeliveryRequest>,
    pub crow: CrowDistances,
}

impl DeliveryPlan {
    pub fn deliver_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_deliver()).count()
    }
}

// ── DeliveryPlanner ───────────────────────────────────────────────────────────

/// Plans delivery tours over a borrowed [`StreetMap`].
///
/// # Example
///
/// ```
/// use nav_core::{DeliveryRequest, GeoCoord};
/// use nav_plan::DeliveryPlanner;
/// use nav_spatial::StreetMapBuilder;
///
/// let depot = GeoCoord::from_degrees(0.0, 0.0);
/// let shop = GeoCoord::from_degrees(0.0, 0.01);
/// let mut b = StreetMapBuilder::new();
/// b.add_segment(depot.clone(), shop.clone(), "Main St");
/// let map = b.build();
///
/// let plan = DeliveryPlanner::new(&map)
///     .plan(&depot, &[DeliveryRequest::new("book", shop)])
///     .unwrap();
/// let lines: Vec<String> = plan.commands.iter().map(|c| c.to_string()).collect();
/// assert_eq!(lines, ["Proceed 0.69 miles east on Main St", "Deliver book", "Proceed 0.69 miles west on Main St"]);
/// ```
pub struct DeliveryPlanner<'m, R = BfsRouter, O = NearestNeighborOptimizer> {
    map: &'m StreetMap,
    router: R,
    optimizer: O,
}

impl<'m> DeliveryPlanner<'m> {
    /// Planner with breadth-first routing and nearest-neighbour ordering.
    pub fn new(map: &'m StreetMap) -> Self {
        Self::with_parts(map, BfsRouter, NearestNeighborOptimizer)
    }
}

impl<'m, R: Router, O: OrderOptimizer> DeliveryPlanner<'m, R, O> {
    pub fn with_parts(map: &'m StreetMap, router: R, optimizer: O) -> Self {
        Self { map, router, optimizer }
    }

    /// Order, route and narrate a tour from `depot` through `deliveries`
    /// and back.
    ///
    /// An empty `deliveries` slice is an empty plan of zero length.
    ///
    /// # Errors
    ///
    /// The first failing leg's [`nav_spatial::SpatialError::BadCoord`] or
    /// [`nav_spatial::SpatialError::NoRoute`], wrapped in
    /// [`crate::PlanError::Route`].
    pub fn plan(&self, depot: &GeoCoord, deliveries: &[DeliveryRequest]) -> PlanResult<DeliveryPlan> {
        let Some(first) = deliveries.first() else {
            return Ok(DeliveryPlan::default());
        };

        let mut stops = deliveries.to_vec();
        let crow = self.optimizer.optimize(depot, &mut stops);

        let legs = self.route_legs(depot, &first.location, &stops)?;

        let mut commands = Vec::new();
        let mut distance_miles = 0.0;
        for (i, leg) in legs.iter().enumerate() {
            distance_miles += leg.distance_miles;
            narrate_leg(&leg.segments, &mut commands);
            // legs.len() == stops.len() + 1: the return leg has no stop.
            if let Some(stop) = stops.get(i) {
                commands.push(Command::Deliver { item: stop.item.clone() });
            }
        }

        info!(
            "planned {} deliveries: {} commands, {distance_miles:.3} mi routed (crow {:.3} -> {:.3} mi)",
            stops.len(),
            commands.len(),
            crow.old_miles,
            crow.new_miles,
        );

        Ok(DeliveryPlan { commands, distance_miles, stops, crow })
    }

    fn route_legs(
        &self,
        depot: &GeoCoord,
        first: &GeoCoord,
        stops: &[DeliveryRequest],
    ) -> PlanResult<Vec<Route>> {
        let mut legs = Vec::with_capacity(stops.len() + 1);
        legs.push(self.leg(depot, first)?);
        for pair in stops.windows(2) {
            legs.push(self.leg(&pair[0].location, &pair[1].location)?);
        }
        if let Some(last) = stops.last() {
            legs.push(self.leg(&last.location, depot)?);
        }
        Ok(legs)
    }

    fn leg(&self, from: &GeoCoord, to: &GeoCoord) -> PlanResult<Route> {
        let route = self.router.route(self.map, from, to)?;
        debug!("leg {from} -> {to}: {} segments", route.hop_count());
        Ok(route)
    }
}

// ── Narration ─────────────────────────────────────────────────────────────────

/// A run of consecutive segments on one street.
struct Run<'s> {
    street: &'s str,
    direction: Direction,
    distance_miles: f64,
}

impl<'s> Run<'s> {
    fn start(seg: &'s StreetSegment) -> Self {
        Self {
            street: &seg.name,
            direction: Direction::from_bearing(seg.bearing_deg()),
            distance_miles: seg.length_miles(),
        }
    }

    fn into_command(self) -> Command {
        Command::Proceed {
            direction: self.direction,
            street: self.street.to_owned(),
            distance_miles: self.distance_miles,
        }
    }
}

/// Append the `Turn` / `Proceed` commands for one leg's segments.
pub fn narrate_leg(segments: &[StreetSegment], commands: &mut Vec<Command>) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let mut run = Run::start(first);
    let mut prev = first;
    for seg in rest {
        if seg.name == run.street {
            run.distance_miles += seg.length_miles();
        } else {
            if let Some(side) = TurnSide::from_angle(angle_between(prev, seg)) {
                commands.push(Command::Turn { side, street: seg.name.clone() });
            }
            let done = std::mem::replace(&mut run, Run::start(seg));
            commands.push(done.into_command());
        }
        prev = seg;
    }
    commands.push(run.into_command());
}
