//! Spatial-subsystem error type.

use thiserror::Error;

use tg_core::GeoError;

/// Errors produced by `tg-spatial`'s configuration and loading paths.
///
/// Pure geometry functions return [`GeoError`] directly; it converts into
/// this type with `?`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid fix on row {row}: ({lat}, {lng}) is not a valid coordinate")]
    InvalidFix { row: usize, lat: f64, lng: f64 },

    #[error("fix parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
