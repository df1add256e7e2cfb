//! Geographic coordinate type and flat-earth geometry primitives.
//!
//! `GeoCoord` keeps the latitude/longitude **text** it was created from next
//! to the parsed `f64` values.  Equality and hashing use the text only, so a
//! coordinate read from a map file is an exact lookup key: `"34.0625"` and
//! `"34.06250"` are different coordinates even though they parse to the same
//! number.  Distances and bearings use the parsed values.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{NavError, NavResult};

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Statute miles per kilometre.
const MILES_PER_KM: f64 = 0.621_371;

/// A latitude/longitude pair compared by its exact textual representation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoord {
    lat_text: String,
    lon_text: String,
    lat: f64,
    lon: f64,
}

impl GeoCoord {
    /// Parse a coordinate from its textual latitude and longitude.
    ///
    /// Surrounding whitespace is trimmed; the remaining text is kept verbatim
    /// as the identity of the coordinate.
    pub fn parse(lat_text: &str, lon_text: &str) -> NavResult<Self> {
        let lat_text = lat_text.trim();
        let lon_text = lon_text.trim();
        let lat = parse_degrees(lat_text)?;
        let lon = parse_degrees(lon_text)?;
        Ok(Self {
            lat_text: lat_text.to_owned(),
            lon_text: lon_text.to_owned(),
            lat,
            lon,
        })
    }

    /// Build a coordinate from numeric degrees.
    ///
    /// The text key is Rust's shortest round-trip formatting of each value,
    /// so `from_degrees(34.5, -118.25)` equals `parse("34.5", "-118.25")`.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat_text: lat.to_string(),
            lon_text: lon.to_string(),
            lat,
            lon,
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat_text(&self) -> &str {
        &self.lat_text
    }

    pub fn lon_text(&self) -> &str {
        &self.lon_text
    }

    /// Great-circle distance to `other` in miles.
    #[inline]
    pub fn distance_miles(&self, other: &GeoCoord) -> f64 {
        distance_miles(self, other)
    }

    /// Flat-earth bearing from `self` towards `other`.  See [`bearing_deg`].
    #[inline]
    pub fn bearing_deg_to(&self, other: &GeoCoord) -> f64 {
        bearing_deg(self, other)
    }
}

impl PartialEq for GeoCoord {
    fn eq(&self, other: &Self) -> bool {
        self.lat_text == other.lat_text && self.lon_text == other.lon_text
    }
}

impl Eq for GeoCoord {}

impl Hash for GeoCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat_text.hash(state);
        self.lon_text.hash(state);
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat_text, self.lon_text)
    }
}

fn parse_degrees(text: &str) -> NavResult<f64> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(NavError::InvalidCoordinate(text.to_owned())),
    }
}

// ── Primitives ───────────────────────────────────────────────────────────────

/// Haversine great-circle distance in miles.
pub fn distance_miles(a: &GeoCoord, b: &GeoCoord) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c * MILES_PER_KM
}

/// Bearing of the line `from → to` in degrees, in `[0, 360)`.
///
/// Flat-earth: longitude is the x axis and latitude the y axis, so 0° points
/// east and angles grow counter-clockwise (90° = north).
pub fn bearing_deg(from: &GeoCoord, to: &GeoCoord) -> f64 {
    let angle = (to.lat - from.lat).atan2(to.lon - from.lon).to_degrees();
    normalize_deg(angle)
}

/// Map any angle in degrees into `[0, 360)`.
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}
