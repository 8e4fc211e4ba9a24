//! Spatial-subsystem error type.

use thiserror::Error;

use rr_core::{CoreError, GeoPoint};

/// Errors produced by `rr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("segment dataset is empty")]
    EmptyDataset,

    #[error("dataset holds {0} segments, more than a store can index")]
    TooManySegments(usize),

    #[error(transparent)]
    InvalidSegment(#[from] CoreError),

    #[error("no road segment within {radius_km} km of {point}")]
    NoSegmentNear { point: GeoPoint, radius_km: f64 },

    #[error("no road segments within {width_km} km of the route {start} → {end}")]
    NoSegmentsAlongRoute { start: GeoPoint, end: GeoPoint, width_km: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("dataset parse error: {0}")]
    Parse(String),
}

impl SpatialError {
    /// `true` for the "no data here" outcomes, which are not defects.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SpatialError::NoSegmentNear { .. } | SpatialError::NoSegmentsAlongRoute { .. }
        )
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
