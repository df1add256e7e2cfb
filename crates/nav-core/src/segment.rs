//! Directed street segments.

use std::fmt;

use crate::geo::{bearing_deg, distance_miles, normalize_deg};
use crate::GeoCoord;

/// A directed piece of a named street, from `start` to `end`.
///
/// A two-way street is two segments, one per direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetSegment {
    pub start: GeoCoord,
    pub end: GeoCoord,
    pub name: String,
}

impl StreetSegment {
    pub fn new(start: GeoCoord, end: GeoCoord, name: impl Into<String>) -> Self {
        Self { start, end, name: name.into() }
    }

    /// The same street piece travelled in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end.clone(),
            end: self.start.clone(),
            name: self.name.clone(),
        }
    }

    /// Great-circle length in miles.
    #[inline]
    pub fn length_miles(&self) -> f64 {
        distance_miles(&self.start, &self.end)
    }

    /// Bearing of travel along this segment, in `[0, 360)`.
    #[inline]
    pub fn bearing_deg(&self) -> f64 {
        bearing_deg(&self.start, &self.end)
    }
}

impl fmt::Display for StreetSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.name, self.start, self.end)
    }
}

/// Change of heading when moving from `prev` onto `next`, in `[0, 360)`.
///
/// Values below 180° are counter-clockwise (leftward) changes.
pub fn angle_between(prev: &StreetSegment, next: &StreetSegment) -> f64 {
    normalize_deg(next.bearing_deg() - prev.bearing_deg())
}
