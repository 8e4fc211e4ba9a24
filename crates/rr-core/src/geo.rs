//! Geographic coordinate type and distance primitives.
//!
//! Two distance notions coexist in this crate:
//!
//! - [`GeoPoint::distance_km`]: haversine great-circle distance on a sphere
//!   of radius [`EARTH_RADIUS_KM`].  Used for point lookups and route length.
//! - [`point_to_segment_deg`]: Euclidean distance in raw degree space.  The
//!   planar corridor filter multiplies it by [`KM_PER_DEGREE`] to get an
//!   approximate kilometre figure.
//!
//! The planar figure does **not** scale longitude degrees by `cos(lat)`, so
//! east–west separation is overstated in degrees and the effective corridor
//! is narrower than requested away from the equator (≈ 40 % narrower at UK
//! latitudes).  Existing corridor output depends on this; use
//! [`cross_track_km`] (via `CorridorMode::Geodesic`) for true distances.

use std::fmt;

/// Mean Earth radius used by every haversine computation, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Flat kilometres-per-degree factor of the planar corridor approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Arc length of one degree of latitude on the haversine sphere (≈ 111.195 km).
pub const KM_PER_DEGREE_ARC: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside `[-90, 90]` ×
    /// `[-180, 180]`.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Symmetric, and exactly `0.0` when `self == other`.  Out-of-range input
    /// is not rejected; validate upstream.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // `min(1.0)` guards asin against rounding just above 1 for antipodes.
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }

    /// Euclidean distance treating `(lat, lon)` as plane coordinates, in
    /// degrees.
    #[inline]
    pub fn planar_distance_deg(self, other: GeoPoint) -> f64 {
        (other.lat - self.lat).hypot(other.lon - self.lon)
    }

    /// Initial great-circle bearing from `self` towards `other`, in radians
    /// clockwise from north.
    pub fn initial_bearing_rad(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        y.atan2(x)
    }

    /// Point halfway along the great-circle arc from `self` to `other`.
    pub fn midpoint(self, other: GeoPoint) -> GeoPoint {
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let bx = lat2.cos() * d_lon.cos();
        let by = lat2.cos() * d_lon.sin();
        let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
        let lon = lon1 + by.atan2(lat1.cos() + bx);

        // Normalise longitude back into [-180, 180].
        let lon_deg = (lon.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        GeoPoint::new(lat.to_degrees(), lon_deg)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── GeoBounds ─────────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon box with inclusive edges.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBounds {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl GeoBounds {
    /// Smallest box containing both corners, in any order.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            min: GeoPoint::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            max: GeoPoint::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// Grow the box by `margin_deg` on every side (no wrap-around handling).
    pub fn expand_deg(self, margin_deg: f64) -> Self {
        Self {
            min: GeoPoint::new(self.min.lat - margin_deg, self.min.lon - margin_deg),
            max: GeoPoint::new(self.max.lat + margin_deg, self.max.lon + margin_deg),
        }
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.min.lat <= p.lat
            && p.lat <= self.max.lat
            && self.min.lon <= p.lon
            && p.lon <= self.max.lon
    }
}

// ── Segment distances ─────────────────────────────────────────────────────────

/// Distance from `p` to the finite line segment `[a, b]`, in degree space.
///
/// The projection parameter is clamped to `[0, 1]` so the closest point stays
/// on the segment.  When `a == b` this is `p.planar_distance_deg(a)`.
pub fn point_to_segment_deg(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = b.lat - a.lat;
    let d_lon = b.lon - a.lon;
    let len_2 = d_lat * d_lat + d_lon * d_lon;

    if len_2 == 0.0 {
        return p.planar_distance_deg(a);
    }

    let t = (((p.lat - a.lat) * d_lat + (p.lon - a.lon) * d_lon) / len_2).clamp(0.0, 1.0);
    let closest = GeoPoint::new(a.lat + t * d_lat, a.lon + t * d_lon);
    p.planar_distance_deg(closest)
}

/// Spherical distance in kilometres from `p` to the great-circle arc `[a, b]`.
///
/// Uses the cross-track distance when the perpendicular foot lands on the arc
/// and the distance to the nearer endpoint otherwise.  When `a == b` this is
/// `p.distance_km(a)`.
pub fn cross_track_km(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let arc_km = a.distance_km(b);
    if arc_km == 0.0 {
        return p.distance_km(a);
    }

    let a_to_p_km = a.distance_km(p);
    let delta = a_to_p_km / EARTH_RADIUS_KM;
    let theta = a.initial_bearing_rad(p) - a.initial_bearing_rad(b);

    // Foot of the perpendicular lies behind `a`.
    if theta.cos() < 0.0 {
        return a_to_p_km;
    }

    let cross = (delta.sin() * theta.sin()).clamp(-1.0, 1.0).asin();
    let along_km = (delta.cos() / cross.cos()).clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM;

    if along_km > arc_km {
        return p.distance_km(b);
    }
    cross.abs() * EARTH_RADIUS_KM
}
