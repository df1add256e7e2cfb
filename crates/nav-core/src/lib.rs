//! `nav-core`: foundational types for the delivery navigator.
//!
//! Every other `nav-*` crate depends on this one.  It has no `nav-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`geo`]       | `GeoCoord`, haversine distance, flat-earth bearing      |
//! | [`segment`]   | `StreetSegment`, `angle_between`                        |
//! | [`delivery`]  | `DeliveryRequest`                                       |
//! | [`error`]     | `NavError`, `NavResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod delivery;
pub mod error;
pub mod geo;
pub mod segment;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use delivery::DeliveryRequest;
pub use error::{NavError, NavResult};
pub use geo::{GeoCoord, bearing_deg, distance_miles};
pub use segment::{StreetSegment, angle_between};
