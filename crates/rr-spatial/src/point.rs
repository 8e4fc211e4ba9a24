//! Nearest-segment lookup around a single coordinate.

use rr_core::{GeoPoint, Segment, SegmentIdx};

use crate::locator::{IndexedScan, SegmentLocator};
use crate::SegmentStore;

/// The segment closest to a query point, with its haversine distance.
#[derive(Copy, Clone, Debug)]
pub struct NearestHit<'s> {
    pub idx:         SegmentIdx,
    pub segment:     &'s Segment,
    pub distance_km: f64,
}

/// Closest segment to `point` within `max_radius_km`, or `None`.
///
/// Equal distances resolve to the segment that comes first in store order.
pub fn nearest(store: &SegmentStore, point: GeoPoint, max_radius_km: f64) -> Option<NearestHit<'_>> {
    IndexedScan.nearest(store, point, max_radius_km)
}

/// Scan `candidates` in the order given and keep the first strict minimum
/// that is within `max_radius_km`.
pub(crate) fn nearest_among<'s>(
    candidates: impl IntoIterator<Item = (SegmentIdx, &'s Segment)>,
    point: GeoPoint,
    max_radius_km: f64,
) -> Option<NearestHit<'s>> {
    let mut best: Option<NearestHit<'s>> = None;
    let mut min_distance = f64::INFINITY;

    for (idx, segment) in candidates {
        let distance_km = point.distance_km(segment.location());
        if distance_km < min_distance && distance_km <= max_radius_km {
            min_distance = distance_km;
            best = Some(NearestHit { idx, segment, distance_km });
        }
    }
    best
}
