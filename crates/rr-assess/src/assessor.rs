//! Query facade: the two boundary operations plus dataset stats.
//!
//! An [`Assessor`] borrows an immutable [`SegmentStore`], owns a locator and
//! an [`EngineConfig`], and turns validated requests into reports.  It holds
//! no mutable state, so one instance can serve concurrent callers.

use chrono::{DateTime, Utc};
use tracing::debug;

use rr_core::{GeoPoint, RiskLevel, Segment};
use rr_spatial::{Corridor, CorridorMode, IndexedScan, SegmentLocator, SegmentStore};

use crate::aggregate::{aggregate, RouteStats};
use crate::sample::sample_evenly;
use crate::stats::DatasetStats;
use crate::{AssessError, AssessResult, EngineConfig};

/// Vehicle type echoed when a request does not name one.
pub const DEFAULT_VEHICLE_TYPE: &str = "generic";

// ── Requests and reports ──────────────────────────────────────────────────────

/// Nearest segment to a location, with its derived tier.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LocationReadiness<'s> {
    pub segment:     &'s Segment,
    pub distance_km: f64,
    pub risk_level:  RiskLevel,
}

/// A route assessment request.  Unset options fall back to the
/// [`EngineConfig`] defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub start:             GeoPoint,
    pub end:               GeoPoint,
    pub corridor_width_km: Option<f64>,
    pub max_sample_count:  Option<usize>,
    pub corridor_mode:     Option<CorridorMode>,
    /// Accepted and echoed; does not affect matching or scoring yet.
    pub vehicle_type:      Option<String>,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            corridor_width_km: None,
            max_sample_count:  None,
            corridor_mode:     None,
            vehicle_type:      None,
        }
    }

    pub fn corridor_width_km(mut self, width_km: f64) -> Self {
        self.corridor_width_km = Some(width_km);
        self
    }

    pub fn max_sample_count(mut self, max_count: usize) -> Self {
        self.max_sample_count = Some(max_count);
        self
    }

    pub fn corridor_mode(mut self, mode: CorridorMode) -> Self {
        self.corridor_mode = Some(mode);
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }
}

/// Result of a route query.
///
/// `stats` is computed over `segments`, the full match.  `display_segments`
/// is an even sample of it for presentation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteAssessment<'s> {
    pub route_id:          String,
    pub start:             GeoPoint,
    pub end:               GeoPoint,
    pub corridor_width_km: f64,
    pub corridor_mode:     CorridorMode,
    pub vehicle_type:      String,
    pub stats:             RouteStats<'s>,
    pub segments:          Vec<&'s Segment>,
    pub display_segments:  Vec<&'s Segment>,
}

/// `route_YYYYmmdd_HHMMSS` for `now`, in UTC.
pub fn route_id(now: DateTime<Utc>) -> String {
    now.format("route_%Y%m%d_%H%M%S").to_string()
}

// ── Assessor ──────────────────────────────────────────────────────────────────

/// Store, locator and configuration bundled for query handling.
///
/// # Example
///
/// ```rust,ignore
/// let store = load_json(Path::new("segments.json"))?;
/// let assessor = Assessor::new(&store, EngineConfig::default());
/// let here = assessor.location_readiness(GeoPoint::new(51.13, 1.31), None)?;
/// let route = assessor.assess_route(&RouteRequest::new(start, end))?;
/// ```
pub struct Assessor<'s, L: SegmentLocator = IndexedScan> {
    store:   &'s SegmentStore,
    locator: L,
    config:  EngineConfig,
}

impl<'s> Assessor<'s, IndexedScan> {
    /// An assessor backed by the R-tree locator.
    pub fn new(store: &'s SegmentStore, config: EngineConfig) -> Self {
        Self::with_locator(store, IndexedScan, config)
    }
}

impl<'s, L: SegmentLocator> Assessor<'s, L> {
    pub fn with_locator(store: &'s SegmentStore, locator: L, config: EngineConfig) -> Self {
        Self { store, locator, config }
    }

    pub fn store(&self) -> &'s SegmentStore {
        self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nearest segment to `point` within `radius_km` (or the configured
    /// default).  Not-found surfaces as [`AssessError::Spatial`] with
    /// [`is_not_found`](AssessError::is_not_found) set.
    pub fn location_readiness(
        &self,
        point: GeoPoint,
        radius_km: Option<f64>,
    ) -> AssessResult<LocationReadiness<'s>> {
        check_point("location", point)?;
        let radius_km = radius_km.unwrap_or(self.config.query.radius_km);
        check_positive("radius_km", radius_km)?;

        let hit = self.locator.require_nearest(self.store, point, radius_km)?;
        debug!(%point, radius_km, segment = %hit.segment.id, distance_km = hit.distance_km, "location readiness");

        Ok(LocationReadiness {
            segment:     hit.segment,
            distance_km: hit.distance_km,
            risk_level:  hit.segment.risk_level(&self.config.thresholds),
        })
    }

    /// Assess the corridor described by `request`, stamped with the current
    /// UTC time.
    pub fn assess_route(&self, request: &RouteRequest) -> AssessResult<RouteAssessment<'s>> {
        self.assess_route_at(request, Utc::now())
    }

    /// Like [`assess_route`](Self::assess_route) with an explicit clock.
    pub fn assess_route_at(
        &self,
        request: &RouteRequest,
        now: DateTime<Utc>,
    ) -> AssessResult<RouteAssessment<'s>> {
        check_point("start", request.start)?;
        check_point("end", request.end)?;
        let width_km = request
            .corridor_width_km
            .unwrap_or(self.config.query.corridor_width_km);
        check_positive("corridor_width_km", width_km)?;
        let max_samples = request
            .max_sample_count
            .unwrap_or(self.config.query.max_sample_count);
        let mode = request.corridor_mode.unwrap_or(self.config.corridor_mode);

        let corridor = Corridor::with_mode(request.start, request.end, width_km, mode);
        let matched = self.locator.require_corridor(self.store, &corridor)?;
        let stats = aggregate(&matched, &self.config)?;
        let display_segments = sample_evenly(matched.segments(), max_samples);

        debug!(
            start = %request.start,
            end = %request.end,
            width_km,
            matched = matched.len(),
            displayed = display_segments.len(),
            mean = stats.mean_readiness,
            "route assessed"
        );

        Ok(RouteAssessment {
            route_id: route_id(now),
            start: request.start,
            end: request.end,
            corridor_width_km: width_km,
            corridor_mode: mode,
            vehicle_type: request
                .vehicle_type
                .clone()
                .unwrap_or_else(|| DEFAULT_VEHICLE_TYPE.to_owned()),
            stats,
            segments: matched.into_segments(),
            display_segments,
        })
    }

    pub fn dataset_stats(&self) -> DatasetStats {
        DatasetStats::compute(self.store, &self.config)
    }
}

// ── Input checks ──────────────────────────────────────────────────────────────

fn check_point(name: &str, p: GeoPoint) -> AssessResult<()> {
    if p.is_valid() {
        Ok(())
    } else {
        Err(AssessError::InvalidQuery(format!("{name} {p} is not a valid coordinate")))
    }
}

fn check_positive(name: &str, value: f64) -> AssessResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AssessError::InvalidQuery(format!("{name} must be positive, got {value}")))
    }
}
