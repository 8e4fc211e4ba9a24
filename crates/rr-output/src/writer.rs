//! The `SegmentWriter` trait implemented by export backends.

use crate::{OutputResult, SegmentRow};

/// Sink for flattened segment rows.
pub trait SegmentWriter {
    /// Append a batch of rows, in order.
    fn write_segments(&mut self, rows: &[SegmentRow]) -> OutputResult<()>;

    /// Flush buffered output.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
