//! Route corridors and the segments matched inside them.
//!
//! # Matching
//!
//! A segment is inside a corridor when it passes two filters, in order:
//!
//! 1. a cheap pre-filter (bounding box, or a circle around the route
//!    midpoint in geodesic mode);
//! 2. the perpendicular distance to the route line, which must be
//!    `≤ width_km`.
//!
//! # Modes
//!
//! | Mode       | Pre-filter                               | Distance                         |
//! |------------|------------------------------------------|----------------------------------|
//! | `Planar`   | endpoint box ± `width_km / 111` degrees  | degree-space distance × 111      |
//! | `Geodesic` | haversine to midpoint ≤ half length + w  | spherical cross-track distance   |
//!
//! `Planar` is the default and keeps output compatible with existing
//! datasets.  It does not correct longitude degrees for latitude.  `Geodesic`
//! is opt-in because it changes which segments match.

use rr_core::{
    cross_track_km, point_to_segment_deg, GeoBounds, GeoPoint, Segment, KM_PER_DEGREE,
};

use crate::locator::{IndexedScan, SegmentLocator};
use crate::window::haversine_window;
use crate::SegmentStore;

/// Kilometres of slack on the geodesic pre-filter radius.
const GEODESIC_REACH_SLACK_KM: f64 = 1e-6;

// ── CorridorMode ──────────────────────────────────────────────────────────────

/// How corridor distances are measured.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CorridorMode {
    /// Degree-space distance scaled by 111 km/degree.
    #[default]
    Planar,
    /// Great-circle cross-track distance.
    Geodesic,
}

// ── Corridor ──────────────────────────────────────────────────────────────────

/// The region within `width_km` of the straight route from `start` to `end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Corridor {
    start:    GeoPoint,
    end:      GeoPoint,
    width_km: f64,
    mode:     CorridorMode,
    /// Planar pre-filter box.
    bounds:   GeoBounds,
    /// Great-circle midpoint of the route.
    midpoint: GeoPoint,
    /// Geodesic pre-filter radius around `midpoint`.
    reach_km: f64,
}

impl Corridor {
    /// A planar corridor.
    pub fn new(start: GeoPoint, end: GeoPoint, width_km: f64) -> Self {
        Self::with_mode(start, end, width_km, CorridorMode::Planar)
    }

    pub fn with_mode(start: GeoPoint, end: GeoPoint, width_km: f64, mode: CorridorMode) -> Self {
        let margin_deg = width_km / KM_PER_DEGREE;
        Self {
            start,
            end,
            width_km,
            mode,
            bounds:   GeoBounds::from_corners(start, end).expand_deg(margin_deg),
            midpoint: start.midpoint(end),
            reach_km: start.distance_km(end) * 0.5 + width_km + GEODESIC_REACH_SLACK_KM,
        }
    }

    pub fn start(&self) -> GeoPoint {
        self.start
    }

    pub fn end(&self) -> GeoPoint {
        self.end
    }

    pub fn width_km(&self) -> f64 {
        self.width_km
    }

    pub fn mode(&self) -> CorridorMode {
        self.mode
    }

    /// Great-circle length of the route line.
    pub fn length_km(&self) -> f64 {
        self.start.distance_km(self.end)
    }

    /// Planar pre-filter box: endpoint box grown by `width_km / 111` degrees.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Stage 1: cheap reject.
    #[inline]
    pub fn prefilter(&self, p: GeoPoint) -> bool {
        match self.mode {
            CorridorMode::Planar   => self.bounds.contains(p),
            CorridorMode::Geodesic => p.distance_km(self.midpoint) <= self.reach_km,
        }
    }

    /// Perpendicular distance from `p` to the route line, in kilometres as
    /// measured by this corridor's mode.
    #[inline]
    pub fn offset_km(&self, p: GeoPoint) -> f64 {
        match self.mode {
            CorridorMode::Planar => point_to_segment_deg(p, self.start, self.end) * KM_PER_DEGREE,
            CorridorMode::Geodesic => cross_track_km(p, self.start, self.end),
        }
    }

    /// Both stages.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.prefilter(p) && self.offset_km(p) <= self.width_km
    }

    /// Box to pull index candidates from, or `None` for a full scan.
    ///
    /// An infinite width has no finite box.
    pub(crate) fn search_bounds(&self) -> Option<GeoBounds> {
        if !self.width_km.is_finite() {
            return None;
        }
        match self.mode {
            CorridorMode::Planar   => Some(self.bounds),
            CorridorMode::Geodesic => haversine_window(self.midpoint, self.reach_km),
        }
    }
}

// ── RouteMatch ────────────────────────────────────────────────────────────────

/// Segments matched by one corridor query, in store order.
///
/// Built per query and dropped with the response; never cached.
#[derive(Clone, Debug)]
pub struct RouteMatch<'s> {
    corridor: Corridor,
    segments: Vec<&'s Segment>,
}

impl<'s> RouteMatch<'s> {
    pub fn new(corridor: Corridor, segments: Vec<&'s Segment>) -> Self {
        Self { corridor, segments }
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn segments(&self) -> &[&'s Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_segments(self) -> Vec<&'s Segment> {
        self.segments
    }
}

/// Segments from `store` inside the planar corridor `[start, end] ± width_km`.
///
/// An empty result is a normal outcome.
pub fn match_corridor(
    store: &SegmentStore,
    start: GeoPoint,
    end: GeoPoint,
    width_km: f64,
) -> RouteMatch<'_> {
    IndexedScan.corridor(store, &Corridor::new(start, end, width_km))
}

/// Keep the candidates inside `corridor`, preserving their order.
pub(crate) fn filter_corridor<'s>(
    candidates: impl IntoIterator<Item = &'s Segment>,
    corridor: &Corridor,
) -> Vec<&'s Segment> {
    candidates
        .into_iter()
        .filter(|s| corridor.contains(s.location()))
        .collect()
}
