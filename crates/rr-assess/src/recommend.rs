//! Route recommendations.

use std::fmt;

use rr_core::{FeatureTag, RiskLevel, RiskThresholds, Segment};

use crate::RecommendationPolicy;

/// One advisory line in a route assessment.
///
/// Serializes as its display message (feature `serde`).
#[derive(Clone, Debug, PartialEq)]
pub enum Recommendation {
    ManualReview { critical_segments: usize },
    LaneMarkingsBelowThreshold { mean: f64, minimum: f64 },
    RoundaboutDensity { roundabouts: usize },
    ConstructionZones { zones: usize },
    /// Emitted alone when no other rule fires.
    MeetsMinimumCriteria,
}

impl Recommendation {
    /// `false` only for [`MeetsMinimumCriteria`](Self::MeetsMinimumCriteria).
    pub fn is_warning(&self) -> bool {
        !matches!(self, Recommendation::MeetsMinimumCriteria)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::ManualReview { critical_segments } => write!(
                f,
                "{critical_segments} critical risk segments detected - manual review recommended"
            ),
            Recommendation::LaneMarkingsBelowThreshold { .. } => f.write_str(
                "Lane marking quality below threshold - consider alternative route or infrastructure upgrade",
            ),
            Recommendation::RoundaboutDensity { roundabouts } => write!(
                f,
                "{roundabouts} roundabouts detected - ensure AV is validated for UK-style roundabouts"
            ),
            Recommendation::ConstructionZones { zones } => write!(
                f,
                "{zones} construction zones - check for real-time updates before deployment"
            ),
            Recommendation::MeetsMinimumCriteria => {
                f.write_str("Route meets minimum readiness criteria for AV deployment")
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Recommendation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Evaluate every rule against `segments`, in a fixed order.
///
/// Rules are independent; several may fire.  If none does, the result is
/// exactly `[MeetsMinimumCriteria]`.  Empty input yields the default as
/// well; aggregation rejects it before getting here.
pub fn recommend(
    segments: &[&Segment],
    thresholds: &RiskThresholds,
    policy: &RecommendationPolicy,
) -> Vec<Recommendation> {
    let mut critical = 0usize;
    let mut roundabouts = 0usize;
    let mut construction = 0usize;
    let mut lane_sum = 0.0;

    for s in segments {
        if s.risk_level(thresholds) == RiskLevel::Critical {
            critical += 1;
        }
        if s.has_feature(FeatureTag::Roundabout) {
            roundabouts += 1;
        }
        if s.has_feature(FeatureTag::ConstructionZone) {
            construction += 1;
        }
        lane_sum += s.infrastructure_quality.lane_markings;
    }

    let mut out = Vec::new();
    if critical > policy.max_critical_segments {
        out.push(Recommendation::ManualReview { critical_segments: critical });
    }
    if !segments.is_empty() {
        let mean = lane_sum / segments.len() as f64;
        if mean < policy.lane_marking_min {
            out.push(Recommendation::LaneMarkingsBelowThreshold {
                mean,
                minimum: policy.lane_marking_min,
            });
        }
    }
    if roundabouts > policy.max_roundabouts {
        out.push(Recommendation::RoundaboutDensity { roundabouts });
    }
    if construction > policy.max_construction_zones {
        out.push(Recommendation::ConstructionZones { zones: construction });
    }

    if out.is_empty() {
        out.push(Recommendation::MeetsMinimumCriteria);
    }
    out
}
