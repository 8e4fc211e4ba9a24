//! JSON dataset loader (feature = `"json"`).
//!
//! # Format
//!
//! A single JSON array, one object per segment, as written by the upstream
//! scoring pipeline:
//!
//! ```json
//! [
//!   {
//!     "segment_id": "London_to_Birmingham_(M1)_0",
//!     "latitude": 51.5074,
//!     "longitude": -0.1278,
//!     "readiness_score": 63.4,
//!     "risk_level": "MODERATE",
//!     "risk_color": "yellow",
//!     "detected_features": ["urban", "pedestrian_crossing"],
//!     "infrastructure_quality": {
//!       "lane_markings": 0.71,
//!       "signage_visibility": 0.88,
//!       "surface_condition": 0.64
//!     },
//!     "weather_impact": 0.12,
//!     "timestamp": "2025-03-01T12:00:00.000123",
//!     "route_name": "London to Birmingham (M1)"
//!   }
//! ]
//! ```
//!
//! `risk_level`, `risk_color`, `detected_features`, `weather_impact` and
//! `route_name` may be omitted.  Unknown feature tags are a parse error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rr_core::{RiskThresholds, Segment};

use crate::{SegmentStore, SegmentStoreBuilder, SpatialError, SpatialResult};

/// Load and validate a segment store from a JSON file.
pub fn load_json(path: &Path) -> SpatialResult<SegmentStore> {
    let file = File::open(path).map_err(SpatialError::Io)?;
    load_json_reader(BufReader::new(file), RiskThresholds::default())
}

/// Like [`load_json`] but accepts any `Read` source and the thresholds used
/// for the stored-label drift report.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_json_reader<R: Read>(reader: R, thresholds: RiskThresholds) -> SpatialResult<SegmentStore> {
    let segments: Vec<Segment> =
        serde_json::from_reader(reader).map_err(|e| SpatialError::Parse(e.to_string()))?;

    tracing::debug!(records = segments.len(), "parsed segment dataset");

    SegmentStoreBuilder::from_segments(segments)
        .thresholds(thresholds)
        .build()
}
