//! Geofence-subsystem error type.

use thiserror::Error;

/// Errors produced by `ppm-geofence`.
#[derive(Debug, Error)]
pub enum GeofenceError {
    #[error("map file contains no edges")]
    EmptyMap,

    #[error("map parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeofenceResult<T> = Result<T, GeofenceError>;
