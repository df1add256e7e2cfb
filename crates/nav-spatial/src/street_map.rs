//! Street graph keyed by coordinate, plus its builder.
//!
//! # Data layout
//!
//! ```text
//! segments: ExpandableMap<GeoCoord, Vec<StreetSegment>>
//!           coord ──► every segment whose `start == coord`
//! ```
//!
//! Every street piece is stored twice, once per direction, so the graph is
//! symmetric: if `A → B` on "Main" is present, so is `B → A` on "Main".  A
//! coordinate only becomes a key once some segment starts there, which lets
//! callers tell "not on the map" apart from "on the map".
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over all keyed coordinates answers "closest map
//! coordinate to this position", used to snap free-form positions onto the
//! graph before routing.

use log::debug;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use nav_core::{GeoCoord, StreetSegment};

use crate::index::{DEFAULT_MAX_LOAD_FACTOR, ExpandableMap};

// ── Input record ──────────────────────────────────────────────────────────────

/// One street as supplied by a map source: a name and the endpoint pairs of
/// its pieces, in any order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetDef {
    pub name: String,
    pub segments: Vec<(GeoCoord, GeoCoord)>,
}

impl StreetDef {
    pub fn new(name: impl Into<String>, segments: Vec<(GeoCoord, GeoCoord)>) -> Self {
        Self { name: name.into(), segments }
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lat, lon]` point and the map coordinate.
#[derive(Clone)]
struct CoordEntry {
    point: [f64; 2], // [lat, lon]
    coord: GeoCoord,
}

impl RTreeObject for CoordEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CoordEntry {
    /// Squared Euclidean distance in lat/lon space.  Good enough to pick the
    /// closest intersection within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── StreetMap ─────────────────────────────────────────────────────────────────

/// Read-only street graph.  Build it with [`StreetMapBuilder`] or
/// [`StreetMap::load_from`].
pub struct StreetMap {
    segments: ExpandableMap<GeoCoord, Vec<StreetSegment>>,
    segment_count: usize,
    spatial_idx: RTree<CoordEntry>,
}

impl StreetMap {
    /// Build a map from street definitions, registering both directions of
    /// every piece.
    pub fn load_from<I>(streets: I) -> Self
    where
        I: IntoIterator<Item = StreetDef>,
    {
        let mut b = StreetMapBuilder::new();
        for street in streets {
            b.add_street(&street);
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Number of distinct coordinates that start at least one segment.
    pub fn coord_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of directed segments (twice the number of street pieces).
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Segments leaving `coord`.
    ///
    /// `None` means `coord` was never registered; `Some` is never empty for
    /// a map built by [`StreetMapBuilder`].
    #[inline]
    pub fn segments_starting_at(&self, coord: &GeoCoord) -> Option<&[StreetSegment]> {
        self.segments.find(coord).map(Vec::as_slice)
    }

    #[inline]
    pub fn contains(&self, coord: &GeoCoord) -> bool {
        self.segments.contains_key(coord)
    }

    /// All registered coordinates, in no particular order.
    pub fn coords(&self) -> impl Iterator<Item = &GeoCoord> + '_ {
        self.segments.keys()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The registered coordinate closest to `(lat, lon)`.
    ///
    /// Returns `None` only if the map is empty.
    pub fn nearest_coord(&self, lat: f64, lon: f64) -> Option<&GeoCoord> {
        self.spatial_idx.nearest_neighbor(&[lat, lon]).map(|e| &e.coord)
    }

    /// `coord` itself when it is on the map, otherwise the closest registered
    /// coordinate.
    ///
    /// Lets free-form positions (typed by hand, or written with a different
    /// number of decimals) be routed.  `None` only for an empty map.
    pub fn snap(&self, coord: &GeoCoord) -> Option<&GeoCoord> {
        match self.segments_starting_at(coord).and_then(|segs| segs.first()) {
            Some(seg) => Some(&seg.start),
            None => self.nearest_coord(coord.lat(), coord.lon()),
        }
    }
}

// ── StreetMapBuilder ──────────────────────────────────────────────────────────

/// Accumulate street pieces, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nav_core::GeoCoord;
/// use nav_spatial::StreetMapBuilder;
///
/// let a = GeoCoord::parse("34.0547", "-118.4794").unwrap();
/// let c = GeoCoord::parse("34.0550", "-118.4790").unwrap();
///
/// let mut b = StreetMapBuilder::new();
/// b.add_segment(a.clone(), c.clone(), "Broxton Ave");
/// let map = b.build();
/// assert_eq!(map.coord_count(), 2);
/// assert_eq!(map.segment_count(), 2); // bidirectional
/// ```
pub struct StreetMapBuilder {
    segments: ExpandableMap<GeoCoord, Vec<StreetSegment>>,
    segment_count: usize,
}

impl StreetMapBuilder {
    pub fn new() -> Self {
        Self::with_max_load_factor(DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Use a non-default maximum load factor for the coordinate index.
    pub fn with_max_load_factor(max_load_factor: f64) -> Self {
        Self {
            segments: ExpandableMap::with_max_load_factor(max_load_factor),
            segment_count: 0,
        }
    }

    /// Register the piece `start → end` of street `name` in **both**
    /// directions.  Segments are appended to whatever the endpoints already
    /// hold.
    pub fn add_segment(&mut self, start: GeoCoord, end: GeoCoord, name: &str) {
        let forward = StreetSegment::new(start.clone(), end.clone(), name);
        let reverse = forward.reversed();
        self.segments.get_or_insert_with(start, Vec::new).push(forward);
        self.segments.get_or_insert_with(end, Vec::new).push(reverse);
        self.segment_count += 2;
    }

    pub fn add_street(&mut self, street: &StreetDef) {
        for (start, end) in &street.segments {
            self.add_segment(start.clone(), end.clone(), &street.name);
        }
    }

    pub fn coord_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Consume the builder and produce a [`StreetMap`].
    ///
    /// Bulk-loads the R-tree in O(N log N) over the N distinct coordinates.
    pub fn build(self) -> StreetMap {
        let entries: Vec<CoordEntry> = self
            .segments
            .keys()
            .map(|c| CoordEntry { point: [c.lat(), c.lon()], coord: c.clone() })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        debug!(
            "street map built: {} coordinates, {} directed segments, {} buckets",
            self.segments.len(),
            self.segment_count,
            self.segments.bucket_count(),
        );

        StreetMap {
            segments: self.segments,
            segment_count: self.segment_count,
            spatial_idx,
        }
    }
}

impl Default for StreetMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
