//! Conservative lat/lon search windows for indexed queries.

use std::f64::consts::FRAC_PI_2;

use rr_core::{GeoBounds, GeoPoint, EARTH_RADIUS_KM};

/// Degrees added to every window edge to absorb rounding.
const SLACK_DEG: f64 = 1e-9;

/// Box containing every point within haversine distance `radius_km` of
/// `center`.
///
/// Returns `None` when no finite box applies: the circle reaches a pole or
/// crosses the antimeridian, or the radius is not a finite non-negative
/// number.  Callers fall back to a full scan.
pub(crate) fn haversine_window(center: GeoPoint, radius_km: f64) -> Option<GeoBounds> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return None;
    }

    let angular = radius_km / EARTH_RADIUS_KM;
    if angular >= FRAC_PI_2 {
        return None;
    }

    let d_lat = angular.to_degrees() + SLACK_DEG;
    let min_lat = center.lat - d_lat;
    let max_lat = center.lat + d_lat;
    if min_lat <= -90.0 || max_lat >= 90.0 {
        return None;
    }

    // Widest longitude offset reachable at this latitude.
    let s = angular.sin() / center.lat.to_radians().cos();
    if s.is_nan() || s >= 1.0 {
        return None;
    }
    let d_lon = s.asin().to_degrees() + SLACK_DEG;
    let min_lon = center.lon - d_lon;
    let max_lon = center.lon + d_lon;
    if min_lon < -180.0 || max_lon > 180.0 {
        return None;
    }

    Some(GeoBounds {
        min: GeoPoint::new(min_lat, min_lon),
        max: GeoPoint::new(max_lat, max_lon),
    })
}
