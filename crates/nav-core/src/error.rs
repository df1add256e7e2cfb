//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `NavError` as one variant
//! where coordinate parsing can fail inside them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid coordinate value {0:?}")]
    InvalidCoordinate(String),
}

/// Shorthand result type for `nav-core`.
pub type NavResult<T> = Result<T, NavError>;
