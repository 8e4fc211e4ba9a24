//! `rr-spatial` — segment store, spatial indexing, and segment queries.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`store`]    | `SegmentStore` (segments + R-tree), `SegmentStoreBuilder`   |
//! | [`point`]    | `nearest`, `NearestHit`                                     |
//! | [`corridor`] | `Corridor`, `CorridorMode`, `RouteMatch`, `match_corridor`  |
//! | [`locator`]  | `SegmentLocator` trait, `LinearScan`, `IndexedScan`, `ParallelScan` |
//! | [`loader`]   | `load_json`, `load_json_reader` (feature = `"json"` only)   |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `json`     | JSON dataset loading via `serde_json` (default).          |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |
//! | `parallel` | Enables the Rayon-backed `ParallelScan` locator.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rr_core::GeoPoint;
//! use rr_spatial::{load_json, match_corridor, nearest};
//!
//! let store = load_json(Path::new("segments.json"))?;
//! let here = nearest(&store, GeoPoint::new(51.13, 1.31), 0.5);
//! let along = match_corridor(&store, GeoPoint::new(51.0, 0.0), GeoPoint::new(52.0, 0.0), 5.0);
//! ```

pub mod corridor;
pub mod error;
pub mod locator;
pub mod point;
pub mod store;
mod window;

#[cfg(feature = "json")]
pub mod loader;


pub use corridor::{match_corridor, Corridor, CorridorMode, RouteMatch};
pub use error::{SpatialError, SpatialResult};
#[cfg(feature = "json")]
pub use loader::{load_json, load_json_reader};
#[cfg(feature = "parallel")]
pub use locator::ParallelScan;
pub use locator::{IndexedScan, LinearScan, SegmentLocator};
pub use point::{nearest, NearestHit};
pub use store::{SegmentStore, SegmentStoreBuilder};
