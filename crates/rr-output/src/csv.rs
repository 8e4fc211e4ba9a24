//! CSV export backend.
//!
//! One header row, then one row per segment:
//!
//! ```text
//! segment_id,latitude,longitude,readiness_score,risk_level,lane_markings,
//! signage_visibility,surface_condition,weather_impact,detected_features,timestamp
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::writer::SegmentWriter;
use crate::{OutputResult, SegmentRow};

/// Column names, in output order.
pub const HEADER: [&str; 11] = [
    "segment_id",
    "latitude",
    "longitude",
    "readiness_score",
    "risk_level",
    "lane_markings",
    "signage_visibility",
    "surface_condition",
    "weather_impact",
    "detected_features",
    "timestamp",
];

/// Writes segment rows to a CSV stream.
pub struct SegmentCsvWriter<W: Write = File> {
    inner:    Writer<W>,
    rows:     u64,
    finished: bool,
}

impl SegmentCsvWriter<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> SegmentCsvWriter<W> {
    /// Wrap any `Write` sink and write the header row.
    pub fn from_writer(sink: W) -> OutputResult<Self> {
        let mut inner = Writer::from_writer(sink);
        inner.write_record(HEADER)?;
        Ok(Self { inner, rows: 0, finished: false })
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.inner.flush()?;
        self.inner
            .into_inner()
            .map_err(|e| crate::OutputError::Io(e.into_error()))
    }
}

impl<W: Write> SegmentWriter for SegmentCsvWriter<W> {
    fn write_segments(&mut self, rows: &[SegmentRow]) -> OutputResult<()> {
        for row in rows {
            self.inner.write_record(&[
                row.segment_id.clone(),
                row.latitude.to_string(),
                row.longitude.to_string(),
                row.readiness_score.to_string(),
                row.risk_level.as_str().to_owned(),
                row.lane_markings.to_string(),
                row.signage_visibility.to_string(),
                row.surface_condition.to_string(),
                row.weather_impact.to_string(),
                row.detected_features.clone(),
                row.timestamp.clone(),
            ])?;
            self.rows += 1;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}
