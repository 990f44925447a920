//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `activity_log.csv`
//! - `agent_utilization.csv`
//! - `summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ActivityRow, AgentUtilizationRow, OutputResult, SummaryRow};

/// Writes run output to three CSV files.
pub struct CsvWriter {
    activity: Writer<File>,
    agents:   Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut activity = Writer::from_path(dir.join("activity_log.csv"))?;
        activity.write_record(["minute", "clock", "severity", "message"])?;

        let mut agents = Writer::from_path(dir.join("agent_utilization.csv"))?;
        agents.write_record([
            "agent_id",
            "blocked_minutes",
            "utilization",
            "open_hours_utilization",
            "completed_tasks",
            "pending_verifications",
        ])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record(["metric", "value"])?;

        Ok(Self {
            activity,
            agents,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_activity(&mut self, row: &ActivityRow) -> OutputResult<()> {
        self.activity.write_record([
            format!("{:.2}", row.minute),
            row.clock.clone(),
            row.severity.to_owned(),
            row.message.clone(),
        ])?;
        Ok(())
    }

    fn write_agents(&mut self, rows: &[AgentUtilizationRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.agent_id.to_string(),
                format!("{:.2}", row.blocked_minutes),
                format!("{:.6}", row.utilization),
                row.open_hours_utilization
                    .map(|u| format!("{u:.6}"))
                    .unwrap_or_default(),
                row.completed_tasks.to_string(),
                row.pending_verifications.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, rows: &[SummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.summary.write_record([&row.metric, &row.value])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.activity.flush()?;
        self.agents.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
