//! Locator trait and its scan strategies.
//!
//! # Pluggability
//!
//! Point and corridor queries go through the [`SegmentLocator`] trait, so the
//! candidate-gathering strategy can change without touching callers.  Every
//! implementation must return exactly what [`LinearScan`] returns: the same
//! segment for `nearest` (first in store order on ties) and the same segments
//! in the same order for `corridor`.
//!
//! | Locator        | Candidate source                          |
//! |----------------|-------------------------------------------|
//! | `LinearScan`   | every segment, O(n)                       |
//! | `IndexedScan`  | R-tree window, full scan as fallback      |
//! | `ParallelScan` | every segment on Rayon (feature `parallel`) |

use tracing::debug;

use rr_core::GeoPoint;

use crate::corridor::{filter_corridor, Corridor, RouteMatch};
use crate::point::{nearest_among, NearestHit};
use crate::window::haversine_window;
use crate::{SegmentStore, SpatialError, SpatialResult};

// ── SegmentLocator trait ──────────────────────────────────────────────────────

/// Pluggable segment search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; one locator serves concurrent
/// queries against a shared store.
pub trait SegmentLocator: Send + Sync {
    /// Closest segment to `point` within `max_radius_km` (haversine), or
    /// `None`.
    fn nearest<'s>(
        &self,
        store: &'s SegmentStore,
        point: GeoPoint,
        max_radius_km: f64,
    ) -> Option<NearestHit<'s>>;

    /// Every segment inside `corridor`, in store order.  May be empty.
    fn corridor<'s>(&self, store: &'s SegmentStore, corridor: &Corridor) -> RouteMatch<'s>;

    /// Like [`nearest`](Self::nearest) but reports "nothing here" as
    /// [`SpatialError::NoSegmentNear`].
    fn require_nearest<'s>(
        &self,
        store: &'s SegmentStore,
        point: GeoPoint,
        max_radius_km: f64,
    ) -> SpatialResult<NearestHit<'s>> {
        self.nearest(store, point, max_radius_km)
            .ok_or(SpatialError::NoSegmentNear { point, radius_km: max_radius_km })
    }

    /// Like [`corridor`](Self::corridor) but reports an empty match as
    /// [`SpatialError::NoSegmentsAlongRoute`].
    fn require_corridor<'s>(
        &self,
        store: &'s SegmentStore,
        corridor: &Corridor,
    ) -> SpatialResult<RouteMatch<'s>> {
        let matched = self.corridor(store, corridor);
        if matched.is_empty() {
            return Err(SpatialError::NoSegmentsAlongRoute {
                start:    corridor.start(),
                end:      corridor.end(),
                width_km: corridor.width_km(),
            });
        }
        Ok(matched)
    }
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Check every segment.  The reference behaviour for all locators.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScan;

impl SegmentLocator for LinearScan {
    fn nearest<'s>(
        &self,
        store: &'s SegmentStore,
        point: GeoPoint,
        max_radius_km: f64,
    ) -> Option<NearestHit<'s>> {
        nearest_among(store.iter_indexed(), point, max_radius_km)
    }

    fn corridor<'s>(&self, store: &'s SegmentStore, corridor: &Corridor) -> RouteMatch<'s> {
        RouteMatch::new(*corridor, filter_corridor(store.all(), corridor))
    }
}

// ── IndexedScan ───────────────────────────────────────────────────────────────

/// Pull candidates from the store's R-tree, then apply the linear predicates
/// to them in store order.
///
/// Windows are conservative, so results match [`LinearScan`].  Queries whose
/// window would reach a pole or cross the antimeridian fall back to a full
/// scan.
#[derive(Copy, Clone, Debug, Default)]
pub struct IndexedScan;

impl SegmentLocator for IndexedScan {
    fn nearest<'s>(
        &self,
        store: &'s SegmentStore,
        point: GeoPoint,
        max_radius_km: f64,
    ) -> Option<NearestHit<'s>> {
        let Some(window) = haversine_window(point, max_radius_km) else {
            debug!(%point, max_radius_km, "no index window; scanning all segments");
            return LinearScan.nearest(store, point, max_radius_km);
        };

        let candidates = store.candidates_in(&window);
        debug!(%point, max_radius_km, candidates = candidates.len(), "nearest query");
        nearest_among(candidates, point, max_radius_km)
    }

    fn corridor<'s>(&self, store: &'s SegmentStore, corridor: &Corridor) -> RouteMatch<'s> {
        if corridor.width_km().is_nan() || corridor.width_km() < 0.0 {
            return RouteMatch::new(*corridor, Vec::new());
        }

        let Some(window) = corridor.search_bounds() else {
            debug!(mode = ?corridor.mode(), "no index window; scanning all segments");
            return LinearScan.corridor(store, corridor);
        };

        let candidates = store.candidates_in(&window);
        let matched = filter_corridor(candidates.into_iter().map(|(_, s)| s), corridor);
        debug!(
            start = %corridor.start(),
            end = %corridor.end(),
            width_km = corridor.width_km(),
            matched = matched.len(),
            "corridor query"
        );
        RouteMatch::new(*corridor, matched)
    }
}

// ── ParallelScan ──────────────────────────────────────────────────────────────

/// Linear scan split across Rayon's thread pool.
#[cfg(feature = "parallel")]
#[derive(Copy, Clone, Debug, Default)]
pub struct ParallelScan;

#[cfg(feature = "parallel")]
impl SegmentLocator for ParallelScan {
    fn nearest<'s>(
        &self,
        store: &'s SegmentStore,
        point: GeoPoint,
        max_radius_km: f64,
    ) -> Option<NearestHit<'s>> {
        use rayon::prelude::*;

        use rr_core::SegmentIdx;

        store
            .all()
            .par_iter()
            .enumerate()
            .map(|(i, segment)| NearestHit {
                idx: SegmentIdx(i as u32),
                segment,
                distance_km: point.distance_km(segment.location()),
            })
            .filter(|hit| hit.distance_km <= max_radius_km)
            // Secondary key keeps the store-order tie-break.
            .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km).then(a.idx.cmp(&b.idx)))
    }

    fn corridor<'s>(&self, store: &'s SegmentStore, corridor: &Corridor) -> RouteMatch<'s> {
        use rayon::prelude::*;

        let matched: Vec<_> = store
            .all()
            .par_iter()
            .filter(|s| corridor.contains(s.location()))
            .collect();
        RouteMatch::new(*corridor, matched)
    }
}
