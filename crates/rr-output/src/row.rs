//! Flat row type written by export backends.

use rr_core::{RiskLevel, RiskThresholds, Segment};

/// Separator between feature tags in the `detected_features` column.
pub const FEATURE_SEPARATOR: &str = ";";

/// One segment flattened for tabular output.
///
/// `risk_level` is the tier derived from the score, not the stored label.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRow {
    pub segment_id:         String,
    pub latitude:           f64,
    pub longitude:          f64,
    pub readiness_score:    f64,
    pub risk_level:         RiskLevel,
    pub lane_markings:      f64,
    pub signage_visibility: f64,
    pub surface_condition:  f64,
    pub weather_impact:     f64,
    /// Feature tags joined with [`FEATURE_SEPARATOR`], in tag order.
    pub detected_features:  String,
    /// ISO-8601 without zone, microsecond precision.
    pub timestamp:          String,
}

impl SegmentRow {
    pub fn from_segment(segment: &Segment, thresholds: &RiskThresholds) -> Self {
        let q = &segment.infrastructure_quality;
        Self {
            segment_id:         segment.id.to_string(),
            latitude:           segment.latitude,
            longitude:          segment.longitude,
            readiness_score:    segment.readiness_score,
            risk_level:         segment.risk_level(thresholds),
            lane_markings:      q.lane_markings,
            signage_visibility: q.signage_visibility,
            surface_condition:  q.surface_condition,
            weather_impact:     segment.weather_impact,
            detected_features:  segment
                .detected_features
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(FEATURE_SEPARATOR),
            timestamp:          segment.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }

    /// Rows for `segments`, in order.
    pub fn from_segments<'a>(
        segments: impl IntoIterator<Item = &'a Segment>,
        thresholds: &RiskThresholds,
    ) -> Vec<Self> {
        segments
            .into_iter()
            .map(|s| Self::from_segment(s, thresholds))
            .collect()
    }
}
