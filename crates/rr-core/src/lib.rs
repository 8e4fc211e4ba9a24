//! `rr-core` — foundational types for the road-readiness engine.
//!
//! This crate is a dependency of every other `rr-*` crate.  It has no `rr-*`
//! dependencies and few external ones (`chrono`, `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`geo`]       | `GeoPoint`, `GeoBounds`, haversine, segment distances      |
//! | [`ids`]       | `SegmentId` (upstream), `SegmentIdx` (store position)      |
//! | [`risk`]      | `RiskLevel`, `RiskColor`, `RiskThresholds`                 |
//! | [`segment`]   | `Segment`, `FeatureTag`, `InfrastructureQuality`           |
//! | [`error`]     | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by the `rr-spatial` JSON loader.                  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod risk;
pub mod segment;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{
    cross_track_km, point_to_segment_deg, GeoBounds, GeoPoint, EARTH_RADIUS_KM, KM_PER_DEGREE,
    KM_PER_DEGREE_ARC,
};
pub use ids::{SegmentId, SegmentIdx};
pub use risk::{RiskColor, RiskLevel, RiskThresholds};
pub use segment::{FeatureTag, InfrastructureQuality, RiskDrift, Segment};
