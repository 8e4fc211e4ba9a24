//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they surface it.

use thiserror::Error;

use crate::SegmentId;

/// Errors produced by `rr-core` validation and parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("segment {id} is invalid: {reason}")]
    InvalidSegment { id: SegmentId, reason: String },

    #[error("unknown feature tag {0:?}")]
    UnknownFeature(String),
}

/// Shorthand result type for `rr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
