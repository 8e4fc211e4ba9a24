//! `rr-output` — tabular export of scored road segments.
//!
//! | Type               | Role                                              |
//! |--------------------|---------------------------------------------------|
//! | [`SegmentRow`]     | One segment flattened, with its derived risk tier |
//! | [`SegmentWriter`]  | Backend trait                                     |
//! | [`SegmentCsvWriter`] | CSV backend (file or any `io::Write`)           |
//!
//! # Usage
//!
//! ```rust,ignore
//! use rr_output::{SegmentCsvWriter, SegmentRow, SegmentWriter};
//!
//! let mut w = SegmentCsvWriter::create(Path::new("route.csv"))?;
//! w.write_segments(&SegmentRow::from_segments(report.segments.iter().copied(), &thresholds))?;
//! w.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;


pub use crate::csv::SegmentCsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{SegmentRow, FEATURE_SEPARATOR};
pub use writer::SegmentWriter;
