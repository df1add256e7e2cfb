//! Spatial-subsystem error type.

use thiserror::Error;

use nav_core::{GeoCoord, NavError};

/// Errors produced by `nav-spatial`.
///
/// `BadCoord` and `NoRoute` are ordinary routing outcomes; `Parse`, `Coord`
/// and `Io` only come out of map loading.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("coordinate {0} is not on the street map")]
    BadCoord(GeoCoord),

    #[error("no route from {from} to {to}")]
    NoRoute { from: GeoCoord, to: GeoCoord },

    #[error("map parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Coord(#[from] NavError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
