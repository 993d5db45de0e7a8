//! Geometry error type.
//!
//! Degenerate-but-valid geometry (coincident points, polygons with fewer than
//! three vertices) is never an error; those cases return a defined value.

use thiserror::Error;

/// Errors produced by `tg-core` and reused by `tg-spatial`'s pure functions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoError {
    /// A required collection was empty.  Programmer error: there is no
    /// meaningful answer (bounding box, centroid, closest point) for zero
    /// inputs.
    #[error("empty input: {what} requires at least one point")]
    EmptyInput { what: &'static str },

    /// Vincenty's iteration did not converge.  Typical for near-antipodal
    /// pairs; fall back to haversine.
    #[error("vincenty formula failed to converge after {iterations} iterations")]
    Convergence { iterations: u32 },

    #[error("index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand result type for geometry functions.
pub type GeoResult<T> = Result<T, GeoError>;
