//! Whole-dataset summary.

use rr_core::RiskLevel;
use rr_spatial::SegmentStore;

use crate::EngineConfig;

/// Segment counts per derived risk tier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskDistribution {
    #[cfg_attr(feature = "serde", serde(rename = "COMPLIANT"))]
    pub compliant: usize,
    #[cfg_attr(feature = "serde", serde(rename = "MODERATE"))]
    pub moderate:  usize,
    #[cfg_attr(feature = "serde", serde(rename = "CRITICAL"))]
    pub critical:  usize,
}

impl RiskDistribution {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Compliant => self.compliant,
            RiskLevel::Moderate  => self.moderate,
            RiskLevel::Critical  => self.critical,
        }
    }

    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Compliant => self.compliant += 1,
            RiskLevel::Moderate  => self.moderate += 1,
            RiskLevel::Critical  => self.critical += 1,
        }
    }
}

/// Summary of a loaded store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatasetStats {
    pub total_segments:    usize,
    pub mean_readiness:    f64,
    pub risk_distribution: RiskDistribution,
    /// `total_segments × nominal_segment_length_km`.
    pub coverage_km:       f64,
    /// Segments whose stored risk labels disagree with the derived tier.
    pub drifted_labels:    usize,
}

impl DatasetStats {
    pub fn compute(store: &SegmentStore, config: &EngineConfig) -> Self {
        let thresholds = &config.thresholds;
        let mut risk_distribution = RiskDistribution::default();
        let mut score_sum = 0.0;

        for s in store.all() {
            score_sum += s.readiness_score;
            risk_distribution.record(s.risk_level(thresholds));
        }

        // A store is never empty.
        let total_segments = store.len();
        Self {
            total_segments,
            mean_readiness: score_sum / total_segments as f64,
            risk_distribution,
            coverage_km: total_segments as f64 * config.nominal_segment_length_km,
            drifted_labels: store.drifted(thresholds).count(),
        }
    }
}
