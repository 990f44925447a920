//! The domain event log.
//!
//! Separate from the `log` facade: these records are simulation output
//! (what happened to which property at which simulated minute), not
//! diagnostics.  Handlers push into `fresh`; after every event the driver
//! hands the fresh records to the observer and keeps the ones the verbosity
//! setting allows.

use std::fmt;

use re_core::SimTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Routine,
    Critical,
}

impl Severity {
    pub fn name(self) -> &'static str {
        match self {
            Severity::Routine  => "routine",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityRecord {
    pub at:       SimTime,
    pub severity: Severity,
    pub message:  String,
}

impl fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.at, self.message)
    }
}

#[derive(Debug, Default)]
pub struct ActivityLog {
    verbose: bool,
    kept:    Vec<ActivityRecord>,
    fresh:   Vec<ActivityRecord>,
}

impl ActivityLog {
    pub fn new(verbose: bool) -> Self {
        Self { verbose, ..Self::default() }
    }

    pub fn push(&mut self, at: SimTime, severity: Severity, message: String) {
        self.fresh.push(ActivityRecord { at, severity, message });
    }

    /// Move the fresh records into the log, calling `visit` on each one
    /// first.  Routine records are dropped afterwards unless verbose.
    pub fn flush(&mut self, mut visit: impl FnMut(&ActivityRecord)) {
        for record in self.fresh.drain(..) {
            visit(&record);
            if self.verbose || record.severity == Severity::Critical {
                self.kept.push(record);
            }
        }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.kept
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
