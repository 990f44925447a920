//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use re_core::format_hhmm;
use re_sim::{ActivityRecord, LossCause, MetricsReport, SimObserver};

use crate::row::{ActivityRow, AgentUtilizationRow, SummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams activity records and the final report to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_activity(&mut self, record: &ActivityRecord) {
        let row = ActivityRow {
            minute:   record.at.minutes(),
            clock:    format_hhmm(record.at.minutes()),
            severity: record.severity.name(),
            message:  record.message.clone(),
        };
        let result = self.writer.write_activity(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, report: &MetricsReport) {
        let agents: Vec<AgentUtilizationRow> = report
            .agents
            .iter()
            .map(|a| AgentUtilizationRow {
                agent_id:               a.agent.0,
                blocked_minutes:        a.blocked_minutes,
                utilization:            a.utilization,
                open_hours_utilization: a.open_hours_utilization,
                completed_tasks:        a.completed_tasks,
                pending_verifications:  a.pending_verifications,
            })
            .collect();
        let result = self.writer.write_agents(&agents);
        self.store_err(result);

        let result = self.writer.write_summary(&summary_rows(report));
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Flatten a report into `metric,value` pairs.
///
/// Optional statistics that are absent for the run are left out.
pub fn summary_rows(report: &MetricsReport) -> Vec<SummaryRow> {
    let c = &report.counters;
    let mut rows = vec![
        SummaryRow::new("seed", report.seed),
        SummaryRow::new("elapsed_minutes", format!("{:.2}", report.elapsed_minutes)),
        SummaryRow::new("run_length", &report.run_length),
        SummaryRow::new("arrivals", c.arrivals),
        SummaryRow::new("sold", c.sold),
    ];
    for cause in LossCause::ALL {
        rows.push(SummaryRow::new(format!("lost_{}", cause.name()), c.losses(cause)));
    }
    rows.extend([
        SummaryRow::new("in_flight", report.in_flight),
        SummaryRow::new("remorse", c.remorse),
        SummaryRow::new("reengagement_wins", c.reengagement_wins),
        SummaryRow::new("notarization_retries", c.notarization_retries),
        SummaryRow::new("replacements_created", c.replacements_created),
        SummaryRow::new("stale_events", c.stale_events),
        SummaryRow::new("events_processed", c.events_processed),
        SummaryRow::new("forced_releases", report.forced_releases),
        SummaryRow::new("conversion_rate", format!("{:.6}", report.conversion_rate)),
        SummaryRow::new(
            "configured_sale_probability",
            format!("{:.6}", report.configured_sale_probability),
        ),
        SummaryRow::new(report.turnover.label, format!("{:.6}", report.turnover.rate)),
        SummaryRow::new("overloaded_agents", report.overloaded_agents),
    ]);
    if let Some(u) = &report.utilization {
        rows.push(SummaryRow::new("utilization_mean", format!("{:.6}", u.mean)));
    }
    if let Some(u) = &report.open_hours_utilization {
        rows.push(SummaryRow::new("open_hours_utilization_mean", format!("{:.6}", u.mean)));
    }
    if let Some(v) = &report.visits_per_sold {
        rows.push(SummaryRow::new("visits_per_sold_mean", format!("{:.4}", v.mean)));
    }
    if let Some(t) = &report.mean_time_to_sale {
        rows.push(SummaryRow::new("mean_time_to_sale", t));
    }
    rows.push(SummaryRow::new("minimum_commission", format!("{:.4}", report.minimum_commission)));
    rows
}
