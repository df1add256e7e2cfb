//! Routing trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! The planner calls routing through the [`Router`] trait, so applications
//! can swap in distance-weighted searches without touching the planner.  The
//! default [`BfsRouter`] minimises the number of segments travelled, not the
//! distance: a route with more but shorter segments is never preferred.
//!
//! # Distance units
//!
//! `Route::distance_miles` is the sum of the great-circle lengths of the
//! route's segments.

use std::collections::VecDeque;

use log::{debug, trace};
use rustc_hash::FxHashSet;

use nav_core::{GeoCoord, StreetSegment};

use crate::index::ExpandableMap;
use crate::street_map::StreetMap;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: connected segments from source to
/// destination and their total length.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Segments to travel in order; each one starts where the previous ended.
    pub segments: Vec<StreetSegment>,
    pub distance_miles: f64,
}

impl Route {
    /// Build a route from connected segments, summing their lengths.
    pub fn from_segments(segments: Vec<StreetSegment>) -> Self {
        let distance_miles = segments.iter().map(StreetSegment::length_miles).sum();
        Self { segments, distance_miles }
    }

    /// `true` if the source and destination are the same coordinate.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.segments.len()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point routing engine.
pub trait Router {
    /// Compute a route from `start` to `end` over `map`.
    ///
    /// `start == end` yields an empty route, even for coordinates that are
    /// not on the map.  Otherwise an endpoint missing from the map is
    /// [`SpatialError::BadCoord`] and a disconnected pair is
    /// [`SpatialError::NoRoute`].
    fn route(&self, map: &StreetMap, start: &GeoCoord, end: &GeoCoord) -> SpatialResult<Route>;
}

impl<R: Router + ?Sized> Router for &R {
    fn route(&self, map: &StreetMap, start: &GeoCoord, end: &GeoCoord) -> SpatialResult<Route> {
        (**self).route(map, start, end)
    }
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Breadth-first search over the street graph.
///
/// Each coordinate is expanded at most once, so a query touches every
/// segment at most once.  The returned route has the fewest segments among
/// all routes; between several equally short ones, the first discovered
/// wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsRouter;

impl Router for BfsRouter {
    fn route(&self, map: &StreetMap, start: &GeoCoord, end: &GeoCoord) -> SpatialResult<Route> {
        bfs(map, start, end)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

fn bfs<'a>(map: &'a StreetMap, start: &'a GeoCoord, end: &GeoCoord) -> SpatialResult<Route> {
    if start == end {
        return Ok(Route::default());
    }
    if !map.contains(end) {
        return Err(SpatialError::BadCoord(end.clone()));
    }
    if !map.contains(start) {
        return Err(SpatialError::BadCoord(start.clone()));
    }

    let mut frontier: VecDeque<&'a GeoCoord> = VecDeque::new();
    let mut visited: FxHashSet<&'a GeoCoord> = FxHashSet::default();
    // came_by[c] = the segment whose traversal first discovered c.
    let mut came_by: ExpandableMap<&'a GeoCoord, &'a StreetSegment> = ExpandableMap::new();

    visited.insert(start);
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        if current == end {
            trace!("bfs reached {end} after discovering {} coordinates", visited.len());
            let route = reconstruct(&came_by, current);
            debug!(
                "route {start} -> {end}: {} segments, {:.4} mi",
                route.hop_count(),
                route.distance_miles,
            );
            return Ok(route);
        }

        let Some(out) = map.segments_starting_at(current) else {
            continue;
        };
        for seg in out {
            if visited.insert(&seg.end) {
                came_by.associate(&seg.end, seg);
                frontier.push_back(&seg.end);
            }
        }
    }

    trace!("bfs exhausted {} coordinates without reaching {end}", visited.len());
    Err(SpatialError::NoRoute { from: start.clone(), to: end.clone() })
}

/// Walk `came_by` back from `end` until the start (which has no entry),
/// then reverse.
fn reconstruct<'a>(
    came_by: &ExpandableMap<&'a GeoCoord, &'a StreetSegment>,
    end: &'a GeoCoord,
) -> Route {
    let mut segments = Vec::new();
    let mut cur = end;
    while let Some(&seg) = came_by.find(&cur) {
        segments.push(seg.clone());
        cur = &seg.start;
    }
    segments.reverse();
    Route::from_segments(segments)
}
