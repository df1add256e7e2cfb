//! `nav-spatial`: coordinate index, street graph, map loading, and routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`index`]      | `ExpandableMap` (chained hash table with rehash)        |
//! | [`street_map`] | `StreetMap` (index + R-tree), `StreetMapBuilder`, `StreetDef` |
//! | [`loader`]     | `load_map_file`, `load_map_reader`, `parse_streets`     |
//! | [`router`]     | `Router` trait, `Route`, `BfsRouter`                    |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public data types.      |

pub mod error;
pub mod index;
pub mod loader;
pub mod router;
pub mod street_map;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use index::ExpandableMap;
pub use loader::{load_map_file, load_map_reader, parse_streets};
pub use router::{BfsRouter, Route, Router};
pub use street_map::{StreetDef, StreetMap, StreetMapBuilder};
