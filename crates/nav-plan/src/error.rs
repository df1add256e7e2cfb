//! Planning error type.

use thiserror::Error;

use nav_spatial::SpatialError;

/// Errors produced by `nav-plan`.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A leg could not be routed.  Carries the router's error unchanged.
    #[error(transparent)]
    Route(#[from] SpatialError),

    #[error("delivery parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    pub fn is_bad_coord(&self) -> bool {
        matches!(self, PlanError::Route(SpatialError::BadCoord(_)))
    }

    pub fn is_no_route(&self) -> bool {
        matches!(self, PlanError::Route(SpatialError::NoRoute { .. }))
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
