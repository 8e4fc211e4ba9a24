//! Assessment error type.

use thiserror::Error;

use rr_spatial::SpatialError;

/// Errors produced by `rr-assess`.
#[derive(Debug, Error)]
pub enum AssessError {
    /// Aggregation was asked to reduce zero segments.  Callers must surface
    /// an empty corridor as not-found before aggregating.
    #[error("cannot aggregate an empty segment set")]
    InvalidAggregationInput,

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid engine configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

impl AssessError {
    /// `true` when the query was valid but found no segments.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssessError::Spatial(e) if e.is_not_found())
    }
}

pub type AssessResult<T> = Result<T, AssessError>;
