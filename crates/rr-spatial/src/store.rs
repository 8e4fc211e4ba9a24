//! Immutable segment store and its builder.
//!
//! # Lifecycle
//!
//! A [`SegmentStore`] is built once at process start (from a loader or a
//! [`SegmentStoreBuilder`]), shared by reference with every query, and dropped
//! at shutdown.  Nothing mutates it in between, so any number of threads can
//! query the same store concurrently without locking.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the [`SegmentIdx`] of each
//! segment.  It is bulk-loaded by [`SegmentStoreBuilder::build`] and only used
//! to narrow candidate sets; every query still applies its exact predicate in
//! store order.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::{debug, info, warn};

use rr_core::{GeoBounds, GeoPoint, RiskDrift, RiskThresholds, Segment, SegmentIdx};

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `SegmentIdx`.
#[derive(Clone)]
pub(crate) struct SegmentEntry {
    point:          [f64; 2], // [lat, lon]
    pub(crate) idx: SegmentIdx,
}

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SegmentEntry {
    /// Squared Euclidean distance in lat/lon space.  Only used to gather
    /// candidates; callers re-check with the real distance.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d_lat = self.point[0] - point[0];
        let d_lon = self.point[1] - point[1];
        d_lat * d_lat + d_lon * d_lon
    }
}

// ── SegmentStore ──────────────────────────────────────────────────────────────

/// Ordered, read-only collection of scored segments plus a spatial index.
///
/// Store order is the load order; queries report results in that order and
/// break distance ties in favour of the earlier segment.
pub struct SegmentStore {
    segments:    Vec<Segment>,
    bounds:      GeoBounds,
    spatial_idx: RTree<SegmentEntry>,
}

impl SegmentStore {
    /// Wrap `segments` as an immutable store.
    ///
    /// Fails with [`SpatialError::EmptyDataset`] on empty input and with
    /// [`SpatialError::InvalidSegment`] if any record is out of range.
    pub fn load(segments: Vec<Segment>) -> SpatialResult<Self> {
        SegmentStoreBuilder::from_segments(segments).build()
    }

    /// Like [`load`](Self::load), checking stored risk labels against
    /// `thresholds` instead of the defaults.
    pub fn load_with(segments: Vec<Segment>, thresholds: RiskThresholds) -> SpatialResult<Self> {
        SegmentStoreBuilder::from_segments(segments)
            .thresholds(thresholds)
            .build()
    }

    /// The full collection in store order.
    #[inline]
    pub fn all(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false` for a successfully loaded store.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: SegmentIdx) -> Option<&Segment> {
        self.segments.get(idx.index())
    }

    /// `(SegmentIdx, &Segment)` pairs in store order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (SegmentIdx, &Segment)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| (SegmentIdx(i as u32), s))
    }

    /// Smallest lat/lon box containing every segment.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Segments whose stored risk labels disagree with the derived tier.
    pub fn drifted<'a>(
        &'a self,
        thresholds: &'a RiskThresholds,
    ) -> impl Iterator<Item = (&'a Segment, RiskDrift)> + 'a {
        self.segments
            .iter()
            .filter_map(move |s| s.risk_drift(thresholds).map(|d| (s, d)))
    }

    /// Segments inside `bounds`, in store order.
    ///
    /// The R-tree is queried with the circle circumscribing `bounds`, then
    /// trimmed back to the box.
    pub(crate) fn candidates_in(&self, bounds: &GeoBounds) -> Vec<(SegmentIdx, &Segment)> {
        let center = [
            (bounds.min.lat + bounds.max.lat) * 0.5,
            (bounds.min.lon + bounds.max.lon) * 0.5,
        ];
        let half_lat = (bounds.max.lat - bounds.min.lat) * 0.5;
        let half_lon = (bounds.max.lon - bounds.min.lon) * 0.5;
        // Slack keeps the box corners inside the circle despite rounding.
        let radius = half_lat.hypot(half_lon) * (1.0 + 1e-9) + 1e-12;

        let mut hits: Vec<SegmentIdx> = self
            .spatial_idx
            .locate_within_distance(center, radius * radius)
            .filter(|e| bounds.contains(GeoPoint::new(e.point[0], e.point[1])))
            .map(|e| e.idx)
            .collect();
        hits.sort_unstable();
        hits.into_iter()
            .map(|idx| (idx, &self.segments[idx.index()]))
            .collect()
    }
}

// ── SegmentStoreBuilder ───────────────────────────────────────────────────────

/// Collect segments, then call [`build`](Self::build) to validate them and
/// bulk-load the index.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use rr_core::{GeoPoint, Segment};
/// use rr_spatial::SegmentStoreBuilder;
///
/// let mut b = SegmentStoreBuilder::new();
/// b.push(Segment::new("a", GeoPoint::new(51.0, 0.0), 80.0, NaiveDateTime::default()));
/// b.push(Segment::new("b", GeoPoint::new(51.5, 0.0), 40.0, NaiveDateTime::default()));
/// let store = b.build().unwrap();
/// assert_eq!(store.len(), 2);
/// ```
pub struct SegmentStoreBuilder {
    segments:   Vec<Segment>,
    thresholds: RiskThresholds,
}

impl SegmentStoreBuilder {
    pub fn new() -> Self {
        Self { segments: Vec::new(), thresholds: RiskThresholds::default() }
    }

    /// Pre-allocate for bulk loading.
    pub fn with_capacity(segments: usize) -> Self {
        Self { segments: Vec::with_capacity(segments), thresholds: RiskThresholds::default() }
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments, thresholds: RiskThresholds::default() }
    }

    /// Thresholds used for the stored-label drift report at build time.
    pub fn thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Consume the builder and produce a [`SegmentStore`].
    ///
    /// Time complexity: O(N) validation + O(N log N) R-tree bulk load.
    pub fn build(self) -> SpatialResult<SegmentStore> {
        let n = self.segments.len();
        if n == 0 {
            return Err(SpatialError::EmptyDataset);
        }
        if u32::try_from(n).is_err() {
            return Err(SpatialError::TooManySegments(n));
        }

        for s in &self.segments {
            s.validate()?;
        }

        let mut drifted = 0usize;
        for s in &self.segments {
            if let Some(drift) = s.risk_drift(&self.thresholds) {
                drifted += 1;
                debug!(
                    segment = %s.id,
                    score = s.readiness_score,
                    stored = ?drift.stored_level,
                    derived = %drift.derived,
                    "stored risk label disagrees with score"
                );
            }
        }
        if drifted > 0 {
            warn!(drifted, total = n, "stored risk labels drift from derived tiers; using derived tiers");
        }

        let first = self.segments[0].location();
        let bounds = self.segments.iter().fold(
            GeoBounds::from_corners(first, first),
            |b, s| {
                let p = s.location();
                GeoBounds {
                    min: GeoPoint::new(b.min.lat.min(p.lat), b.min.lon.min(p.lon)),
                    max: GeoPoint::new(b.max.lat.max(p.lat), b.max.lon.max(p.lon)),
                }
            },
        );

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<SegmentEntry> = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, s)| SegmentEntry {
                point: [s.latitude, s.longitude],
                idx:   SegmentIdx(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        info!(segments = n, "segment store loaded");

        Ok(SegmentStore { segments: self.segments, bounds, spatial_idx })
    }
}

impl Default for SegmentStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Segment> for SegmentStoreBuilder {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        self.segments.extend(iter);
    }
}
