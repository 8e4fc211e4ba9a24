//! `rr-assess` — route scoring and the query facade for the road-readiness
//! engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `EngineConfig`, `QueryDefaults`, `RecommendationPolicy`    |
//! | [`aggregate`] | `aggregate`, `RouteStats`                                  |
//! | [`recommend`] | `recommend`, `Recommendation`                              |
//! | [`sample`]    | `sample_evenly`, `sample_indices`                          |
//! | [`stats`]     | `DatasetStats`, `RiskDistribution`                         |
//! | [`assessor`]  | `Assessor`, `RouteRequest`, `RouteAssessment`, `LocationReadiness` |
//! | [`error`]     | `AssessError`, `AssessResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `serde`    | `Serialize` on reports, `Serialize`/`Deserialize` on config. |
//! | `parallel` | Forwards to `rr-spatial/parallel` (`ParallelScan`).       |

pub mod aggregate;
pub mod assessor;
pub mod config;
pub mod error;
pub mod recommend;
pub mod sample;
pub mod stats;


pub use aggregate::{aggregate, RouteStats};
pub use assessor::{
    route_id, Assessor, LocationReadiness, RouteAssessment, RouteRequest, DEFAULT_VEHICLE_TYPE,
};
pub use config::{EngineConfig, QueryDefaults, RecommendationPolicy};
pub use error::{AssessError, AssessResult};
pub use recommend::{recommend, Recommendation};
pub use sample::{sample_evenly, sample_indices};
pub use stats::{DatasetStats, RiskDistribution};
