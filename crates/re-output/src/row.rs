//! Plain data row types written by output backends.

/// One activity record.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    /// Simulated minutes since the start of the run.
    pub minute:   f64,
    /// `minute` as elapsed `HH:MM`.
    pub clock:    String,
    pub severity: &'static str,
    pub message:  String,
}

/// End-of-run statistics for one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentUtilizationRow {
    pub agent_id:              u32,
    pub blocked_minutes:       f64,
    pub utilization:           f64,
    /// Only when business hours are enabled.
    pub open_hours_utilization: Option<f64>,
    pub completed_tasks:       u64,
    pub pending_verifications: usize,
}

/// One `metric,value` line of the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub metric: String,
    pub value:  String,
}

impl SummaryRow {
    pub fn new(metric: impl Into<String>, value: impl ToString) -> Self {
        Self { metric: metric.into(), value: value.to_string() }
    }
}
