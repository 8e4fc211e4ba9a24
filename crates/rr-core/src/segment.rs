//! The scored road segment and its feature taxonomy.
//!
//! Segments are produced upstream (feature detection + scoring) and are never
//! mutated here.  They still carry the upstream `risk_level` / `risk_color`
//! labels, but every classification done by the engine goes through
//! [`Segment::risk_level`], which derives the tier from the score.  Stored
//! labels are only compared against it ([`Segment::risk_drift`]).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::{CoreError, CoreResult, GeoPoint, RiskColor, RiskLevel, RiskThresholds, SegmentId};

// ── FeatureTag ────────────────────────────────────────────────────────────────

/// Generate `FeatureTag` plus its string table from one list.
macro_rules! feature_tags {
    ($($variant:ident => $name:literal,)*) => {
        /// Road feature detected on a segment.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum FeatureTag {
            $($variant,)*
        }

        impl FeatureTag {
            pub const ALL: &'static [FeatureTag] = &[$(FeatureTag::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(FeatureTag::$variant => $name,)*
                }
            }
        }

        impl FromStr for FeatureTag {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($name => Ok(FeatureTag::$variant),)*
                    other => Err(CoreError::UnknownFeature(other.to_owned())),
                }
            }
        }
    };
}

feature_tags! {
    Bridge           => "bridge",
    BusStop          => "bus_stop",
    ConstructionZone => "construction_zone",
    Curve            => "curve",
    Foggy            => "foggy",
    HardShoulder     => "hard_shoulder",
    Junction         => "junction",
    LaneMerge        => "lane_merge",
    MotorwaySignage  => "motorway_signage",
    MultipleLanes    => "multiple_lanes",
    NoHardShoulder   => "no_hard_shoulder",
    Objects          => "objects",
    ObscuredSignage  => "obscured_signage",
    ParkedCars       => "parked_cars",
    PedestrianCrossing => "pedestrian_crossing",
    Residential      => "residential",
    Roundabout       => "roundabout",
    Rural            => "rural",
    Signage          => "signage",
    SingleLane       => "single_lane",
    Tunnel           => "tunnel",
    Urban            => "urban",
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── InfrastructureQuality ─────────────────────────────────────────────────────

/// Independent quality ratios in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfrastructureQuality {
    /// Lane-marking contrast ratio.
    pub lane_markings:      f64,
    pub signage_visibility: f64,
    pub surface_condition:  f64,
}

impl InfrastructureQuality {
    pub const fn new(lane_markings: f64, signage_visibility: f64, surface_condition: f64) -> Self {
        Self { lane_markings, signage_visibility, surface_condition }
    }

    /// All three ratios set to `ratio`.
    pub const fn uniform(ratio: f64) -> Self {
        Self::new(ratio, ratio, ratio)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// An atomic, geolocated unit of road with a precomputed readiness score.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    #[cfg_attr(feature = "serde", serde(rename = "segment_id"))]
    pub id: SegmentId,

    pub latitude:  f64,
    pub longitude: f64,

    /// Readiness for autonomous operation, `0..=100`.
    pub readiness_score: f64,

    /// Tier label as delivered upstream.  Never used for classification.
    #[cfg_attr(feature = "serde", serde(rename = "risk_level", default))]
    pub stored_risk_level: Option<RiskLevel>,

    /// Colour label as delivered upstream.
    #[cfg_attr(feature = "serde", serde(rename = "risk_color", default))]
    pub stored_risk_color: Option<RiskColor>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub detected_features: BTreeSet<FeatureTag>,

    pub infrastructure_quality: InfrastructureQuality,

    #[cfg_attr(feature = "serde", serde(default))]
    pub weather_impact: f64,

    /// When the score was computed (UTC, no zone suffix upstream).
    pub timestamp: NaiveDateTime,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub route_name: Option<String>,
}

/// Mismatch between a segment's stored labels and its derived tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RiskDrift {
    pub stored_level: Option<RiskLevel>,
    pub stored_color: Option<RiskColor>,
    pub derived:      RiskLevel,
}

impl Segment {
    /// A segment with no features, perfect infrastructure, no weather impact
    /// and no stored labels.  Use the `with_*` methods to fill in the rest.
    pub fn new(
        id: impl Into<SegmentId>,
        location: GeoPoint,
        readiness_score: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            latitude: location.lat,
            longitude: location.lon,
            readiness_score,
            stored_risk_level: None,
            stored_risk_color: None,
            detected_features: BTreeSet::new(),
            infrastructure_quality: InfrastructureQuality::uniform(1.0),
            weather_impact: 0.0,
            timestamp,
            route_name: None,
        }
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = FeatureTag>) -> Self {
        self.detected_features.extend(features);
        self
    }

    pub fn with_quality(mut self, quality: InfrastructureQuality) -> Self {
        self.infrastructure_quality = quality;
        self
    }

    pub fn with_weather_impact(mut self, weather_impact: f64) -> Self {
        self.weather_impact = weather_impact;
        self
    }

    pub fn with_stored_risk(mut self, level: RiskLevel, color: RiskColor) -> Self {
        self.stored_risk_level = Some(level);
        self.stored_risk_color = Some(color);
        self
    }

    pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
        self.route_name = Some(name.into());
        self
    }

    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Tier derived from `readiness_score`; stored labels are ignored.
    #[inline]
    pub fn risk_level(&self, thresholds: &RiskThresholds) -> RiskLevel {
        thresholds.classify(self.readiness_score)
    }

    #[inline]
    pub fn has_feature(&self, tag: FeatureTag) -> bool {
        self.detected_features.contains(&tag)
    }

    /// `Some` when a stored label disagrees with the derived tier.
    ///
    /// Missing labels are not drift.
    pub fn risk_drift(&self, thresholds: &RiskThresholds) -> Option<RiskDrift> {
        let derived = self.risk_level(thresholds);
        let level_ok = self.stored_risk_level.is_none_or(|l| l == derived);
        let color_ok = self.stored_risk_color.is_none_or(|c| c == derived.color());

        if level_ok && color_ok {
            None
        } else {
            Some(RiskDrift {
                stored_level: self.stored_risk_level,
                stored_color: self.stored_risk_color,
                derived,
            })
        }
    }

    /// Check coordinate, score, and ratio ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.location().is_valid() {
            return Err(self.invalid(format!("coordinate {} out of range", self.location())));
        }
        if !(0.0..=100.0).contains(&self.readiness_score) {
            return Err(self.invalid(format!(
                "readiness_score {} outside [0, 100]",
                self.readiness_score
            )));
        }

        let q = &self.infrastructure_quality;
        let ratios = [
            ("lane_markings", q.lane_markings),
            ("signage_visibility", q.signage_visibility),
            ("surface_condition", q.surface_condition),
            ("weather_impact", self.weather_impact),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(self.invalid(format!("{name} {value} outside [0, 1]")));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> CoreError {
        CoreError::InvalidSegment { id: self.id.clone(), reason }
    }
}
