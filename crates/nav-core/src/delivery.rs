//! Delivery requests supplied by the caller.

use std::fmt;

use crate::GeoCoord;

/// An item to drop off at a location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRequest {
    pub item: String,
    pub location: GeoCoord,
}

impl DeliveryRequest {
    pub fn new(item: impl Into<String>, location: GeoCoord) -> Self {
        Self { item: item.into(), location }
    }
}

impl fmt::Display for DeliveryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.item, self.location)
    }
}
