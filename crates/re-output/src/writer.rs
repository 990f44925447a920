//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ActivityRow, AgentUtilizationRow, OutputResult, SummaryRow};

/// Trait implemented by output backends.
///
/// Errors are returned to [`SimOutputObserver`][crate::SimOutputObserver],
/// which keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Append one activity record.
    fn write_activity(&mut self, row: &ActivityRow) -> OutputResult<()>;

    /// Write the per-agent table.  Called once at the end of the run.
    fn write_agents(&mut self, rows: &[AgentUtilizationRow]) -> OutputResult<()>;

    /// Write the run summary.  Called once at the end of the run.
    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: later calls do nothing.
    fn finish(&mut self) -> OutputResult<()>;
}
