//! Engine configuration: query defaults, risk thresholds, and
//! recommendation policy.
//!
//! Every field has a default, so a partial JSON file deserializes cleanly
//! (feature `serde`):
//!
//! ```json
//! {
//!   "query": { "corridor_width_km": 2.0 },
//!   "recommendations": { "max_roundabouts": 5 },
//!   "corridor_mode": "geodesic"
//! }
//! ```

use rr_core::RiskThresholds;
use rr_spatial::CorridorMode;

use crate::{AssessError, AssessResult};

// ── QueryDefaults ─────────────────────────────────────────────────────────────

/// Values used when a request leaves a parameter unset.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueryDefaults {
    /// Search radius for location lookups.  Default: 0.5 km.
    pub radius_km: f64,

    /// Corridor half-width for route assessment.  Default: 5 km.
    pub corridor_width_km: f64,

    /// Upper bound on the display sample.  Default: 100.
    pub max_sample_count: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            radius_km:         0.5,
            corridor_width_km: 5.0,
            max_sample_count:  100,
        }
    }
}

// ── RecommendationPolicy ──────────────────────────────────────────────────────

/// Limits above which a route recommendation fires.
///
/// Each rule fires when its count strictly exceeds the limit (or, for lane
/// markings, when the mean falls strictly below the minimum).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendationPolicy {
    pub max_critical_segments:  usize,
    pub lane_marking_min:       f64,
    pub max_roundabouts:        usize,
    pub max_construction_zones: usize,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            max_critical_segments:  0,
            lane_marking_min:       0.6,
            max_roundabouts:        3,
            max_construction_zones: 0,
        }
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application crate and handed to
/// [`Assessor`](crate::Assessor).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub query: QueryDefaults,

    /// Score boundaries for the three risk tiers, used for both segments and
    /// route means.
    pub thresholds: RiskThresholds,

    pub recommendations: RecommendationPolicy,

    /// Corridor distance measure.  Default: planar (×111 km/degree).
    pub corridor_mode: CorridorMode,

    /// Assumed road length per segment, for dataset coverage.  Default: 50 m.
    pub nominal_segment_length_km: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            query:                     QueryDefaults::default(),
            thresholds:                RiskThresholds::default(),
            recommendations:           RecommendationPolicy::default(),
            corridor_mode:             CorridorMode::default(),
            nominal_segment_length_km: 0.05,
        }
    }
}

impl EngineConfig {
    /// Reject values no query could run with.
    pub fn validate(&self) -> AssessResult<()> {
        let positive = [
            ("query.radius_km", self.query.radius_km),
            ("query.corridor_width_km", self.query.corridor_width_km),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AssessError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let t = &self.thresholds;
        if !(t.moderate_min.is_finite() && t.compliant_min.is_finite()) || t.moderate_min > t.compliant_min {
            return Err(AssessError::Config(format!(
                "thresholds must satisfy moderate_min <= compliant_min, got {} and {}",
                t.moderate_min, t.compliant_min
            )));
        }

        let lane = self.recommendations.lane_marking_min;
        if !(0.0..=1.0).contains(&lane) {
            return Err(AssessError::Config(format!(
                "recommendations.lane_marking_min {lane} outside [0, 1]"
            )));
        }

        let nominal = self.nominal_segment_length_km;
        if !(nominal.is_finite() && nominal >= 0.0) {
            return Err(AssessError::Config(format!(
                "nominal_segment_length_km must be non-negative, got {nominal}"
            )));
        }
        Ok(())
    }
}
