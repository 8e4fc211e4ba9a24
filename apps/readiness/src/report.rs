//! JSON reports printed on stdout.
//!
//! Library results keep full precision; rounding happens only here
//! (distances to 2 dp, mean scores and coverage to 1 dp).

use serde::Serialize;

use rr_assess::{DatasetStats, LocationReadiness, Recommendation, RiskDistribution, RouteAssessment};
use rr_core::{GeoPoint, RiskColor, RiskLevel, Segment};
use rr_spatial::CorridorMode;

/// `value` rounded half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

#[derive(Serialize, Debug)]
pub struct LocationReport<'a> {
    #[serde(flatten)]
    pub segment:     &'a Segment,
    pub distance_km: f64,
    pub derived_risk_level: RiskLevel,
    pub derived_risk_color: RiskColor,
}

impl<'a> From<&LocationReadiness<'a>> for LocationReport<'a> {
    fn from(r: &LocationReadiness<'a>) -> Self {
        Self {
            segment:            r.segment,
            distance_km:        round_to(r.distance_km, 2),
            derived_risk_level: r.risk_level,
            derived_risk_color: r.risk_level.color(),
        }
    }
}

/// Route assessment as printed.
///
/// `segments` is the evenly sampled display list.  The full matched list is
/// included as `matched_segments` only with `--all-segments`; `--csv` always
/// receives it.
#[derive(Serialize, Debug)]
pub struct RouteReport<'a> {
    pub route_id:                String,
    pub vehicle_type:            &'a str,
    pub start:                   GeoPoint,
    pub end:                     GeoPoint,
    pub corridor_width_km:       f64,
    pub corridor_mode:           CorridorMode,
    pub total_distance_km:       f64,
    pub average_readiness_score: f64,
    pub overall_risk_level:      RiskLevel,
    pub matched_segment_count:   usize,
    pub segments:                &'a [&'a Segment],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_segments:        Option<&'a [&'a Segment]>,
    pub critical_segments:       &'a [&'a Segment],
    pub recommendations:         &'a [Recommendation],
}

impl<'a> From<&'a RouteAssessment<'a>> for RouteReport<'a> {
    fn from(a: &'a RouteAssessment<'a>) -> Self {
        Self {
            route_id:                a.route_id.clone(),
            vehicle_type:            &a.vehicle_type,
            start:                   a.start,
            end:                     a.end,
            corridor_width_km:       a.corridor_width_km,
            corridor_mode:           a.corridor_mode,
            total_distance_km:       round_to(a.stats.total_distance_km, 2),
            average_readiness_score: round_to(a.stats.mean_readiness, 1),
            overall_risk_level:      a.stats.overall_risk,
            matched_segment_count:   a.segments.len(),
            segments:                &a.display_segments,
            matched_segments:        None,
            critical_segments:       &a.stats.critical_segments,
            recommendations:         &a.stats.recommendations,
        }
    }
}

impl<'a> RouteReport<'a> {
    pub fn with_matched_segments(mut self, assessment: &'a RouteAssessment<'a>) -> Self {
        self.matched_segments = Some(assessment.segments.as_slice());
        self
    }
}

#[derive(Serialize, Debug)]
pub struct StatsReport {
    pub total_segments_assessed: usize,
    pub average_readiness_score: f64,
    pub risk_distribution:       RiskDistribution,
    pub coverage_km:             f64,
    pub drifted_risk_labels:     usize,
}

impl From<&DatasetStats> for StatsReport {
    fn from(s: &DatasetStats) -> Self {
        Self {
            total_segments_assessed: s.total_segments,
            average_readiness_score: round_to(s.mean_readiness, 1),
            risk_distribution:       s.risk_distribution,
            coverage_km:             round_to(s.coverage_km, 1),
            drifted_risk_labels:     s.drifted_labels,
        }
    }
}

/// Body printed for a query that found nothing.
#[derive(Serialize, Debug)]
pub struct NotFound {
    pub error:  &'static str,
    pub detail: String,
}

impl NotFound {
    pub fn new(detail: impl ToString) -> Self {
        Self { error: "not_found", detail: detail.to_string() }
    }
}
