//! Route-level statistics over a matched segment set.
//!
//! # Rules
//!
//! | Field               | Source                                                |
//! |---------------------|-------------------------------------------------------|
//! | `total_distance_km` | haversine between the corridor endpoints              |
//! | `mean_readiness`    | mean `readiness_score` over every matched segment     |
//! | `overall_risk`      | `mean_readiness` through the configured thresholds    |
//! | `critical_segments` | matched segments whose own derived tier is `CRITICAL` |
//! | `recommendations`   | [`recommend`]                                         |
//!
//! Stored `risk_level` labels are never read here.

use tracing::error;

use rr_core::{RiskLevel, Segment};
use rr_spatial::RouteMatch;

use crate::recommend::{recommend, Recommendation};
use crate::{AssessError, AssessResult, EngineConfig};

/// Statistics for one route query.  Built fresh per query.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteStats<'s> {
    pub total_distance_km: f64,
    pub mean_readiness:    f64,
    pub overall_risk:      RiskLevel,
    pub critical_segments: Vec<&'s Segment>,
    pub recommendations:   Vec<Recommendation>,
}

/// Reduce a corridor match to [`RouteStats`].
///
/// An empty match is a caller bug: the corridor query should already have
/// been reported as not-found.  It is logged and returned as
/// [`AssessError::InvalidAggregationInput`].
pub fn aggregate<'s>(matched: &RouteMatch<'s>, config: &EngineConfig) -> AssessResult<RouteStats<'s>> {
    let segments = matched.segments();
    if segments.is_empty() {
        error!(
            start = %matched.corridor().start(),
            end = %matched.corridor().end(),
            "aggregate called with no matched segments"
        );
        return Err(AssessError::InvalidAggregationInput);
    }

    let thresholds = &config.thresholds;
    let mean_readiness = bounded_mean(segments.iter().map(|s| s.readiness_score));

    let critical_segments = segments
        .iter()
        .copied()
        .filter(|s| s.risk_level(thresholds) == RiskLevel::Critical)
        .collect();

    Ok(RouteStats {
        total_distance_km: matched.corridor().length_km(),
        mean_readiness,
        overall_risk: thresholds.classify(mean_readiness),
        critical_segments,
        recommendations: recommend(segments, thresholds, &config.recommendations),
    })
}

/// Arithmetic mean, clamped to the observed `[min, max]` so summation
/// rounding never reports a mean outside the inputs.
fn bounded_mean(scores: impl Iterator<Item = f64>) -> f64 {
    let (mut sum, mut n) = (0.0, 0usize);
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for score in scores {
        sum += score;
        n += 1;
        lo = lo.min(score);
        hi = hi.max(score);
    }
    (sum / n as f64).max(lo).min(hi)
}
