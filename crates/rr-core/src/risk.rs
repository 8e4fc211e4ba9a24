//! Three-tier risk classification derived from a readiness score.
//!
//! | Tier        | Score (defaults) | Colour   |
//! |-------------|------------------|----------|
//! | `COMPLIANT` | `≥ 75`           | `green`  |
//! | `MODERATE`  | `50 ≤ s < 75`    | `yellow` |
//! | `CRITICAL`  | `< 50`           | `red`    |
//!
//! The same [`RiskThresholds`] classify individual segments and route means.

use std::fmt;

/// Risk tier of a segment or a whole route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum RiskLevel {
    Compliant,
    Moderate,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Compliant, RiskLevel::Moderate, RiskLevel::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Compliant => "COMPLIANT",
            RiskLevel::Moderate  => "MODERATE",
            RiskLevel::Critical  => "CRITICAL",
        }
    }

    /// Map colour shown next to this tier.
    pub fn color(self) -> RiskColor {
        match self {
            RiskLevel::Compliant => RiskColor::Green,
            RiskLevel::Moderate  => RiskColor::Yellow,
            RiskLevel::Critical  => RiskColor::Red,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display colour paired with each [`RiskLevel`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
}

impl RiskColor {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskColor::Green  => "green",
            RiskColor::Yellow => "yellow",
            RiskColor::Red    => "red",
        }
    }
}

impl fmt::Display for RiskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RiskThresholds ────────────────────────────────────────────────────────────

/// Lower score bounds of the `COMPLIANT` and `MODERATE` tiers.
///
/// Both bounds are inclusive; anything below `moderate_min` (including NaN)
/// is `CRITICAL`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskThresholds {
    pub compliant_min: f64,
    pub moderate_min:  f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self { compliant_min: 75.0, moderate_min: 50.0 }
    }
}

impl RiskThresholds {
    pub fn classify(&self, score: f64) -> RiskLevel {
        if score >= self.compliant_min {
            RiskLevel::Compliant
        } else if score >= self.moderate_min {
            RiskLevel::Moderate
        } else {
            RiskLevel::Critical
        }
    }
}
