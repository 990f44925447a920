//! Simulation observer trait for progress reporting and data collection.

use re_queue::ScheduledEvent;

use crate::{ActivityRecord, MetricsReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — sale counter
///
/// ```rust,ignore
/// struct SaleCounter(u64);
///
/// impl SimObserver for SaleCounter {
///     fn on_event(&mut self, event: &ScheduledEvent) {
///         if matches!(event.kind, EventKind::NotarizationDone { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after each event has been handled.
    fn on_event(&mut self, _event: &ScheduledEvent) {}

    /// Called for every activity record, routine ones included, whatever the
    /// log's verbosity.
    fn on_activity(&mut self, _record: &ActivityRecord) {}

    /// Called once with the final report after terminal reconciliation.
    fn on_sim_end(&mut self, _report: &MetricsReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
