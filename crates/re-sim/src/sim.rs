//! The `Sim` struct and its event loop.

use log::{info, warn};
use re_policy::OutcomePolicy;
use re_queue::ScheduledEvent;

use crate::handlers::dispatch;
use crate::{HandlerError, MetricsReport, SimContext, SimError, SimObserver, SimResult};

/// Processed events between two progress lines at `info` level.
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// What one call to [`Sim::step`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// An event was handled.
    Processed(ScheduledEvent),
    /// No events left.  The clock stays at the last event.
    Drained,
    /// The next event lies past the horizon.  The clock now reads the
    /// horizon.
    HorizonReached,
}

/// The main simulation runner.
///
/// ```text
/// loop:
///   peek next event time t
///     none        → stop (drained)
///     t > horizon → clock ← horizon, stop
///   pop, clock ← t, dispatch by kind
///   stale reference → release agent, count, continue
/// finish:
///   force-release blocked agents at the final clock
///   build MetricsReport
/// ```
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: OutcomePolicy> {
    pub ctx: SimContext<P>,
    stopped: bool,
}

impl<P: OutcomePolicy> Sim<P> {
    pub(crate) fn new(ctx: SimContext<P>) -> Self {
        Self { ctx, stopped: false }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the queue drains or the horizon is reached, then reconcile
    /// and report.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<MetricsReport> {
        info!(
            "run start: {} agents, {} properties, horizon {}",
            self.ctx.store.agents.len(),
            self.ctx.store.active_count(),
            re_core::format_span_hours(self.ctx.horizon().hours()),
        );
        while let Step::Processed(_) = self.step(observer)? {}
        Ok(self.finish(observer))
    }

    /// Handle at most one event.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Step> {
        if self.stopped {
            return Ok(Step::HorizonReached);
        }
        let horizon = self.ctx.horizon();
        match self.ctx.queue.peek_time() {
            None => return Ok(Step::Drained),
            Some(t) if t > horizon => {
                self.ctx.queue.close_at(horizon);
                self.stopped = true;
                return Ok(Step::HorizonReached);
            }
            Some(_) => {}
        }

        let event = self.ctx.queue.pop_next()?;
        match dispatch(&mut self.ctx, event.kind) {
            Ok(()) => {}
            Err(HandlerError::StaleReference { event: name, property, agent }) => {
                let now = self.ctx.now();
                self.ctx.store.release_if_owner(agent, property, now);
                self.ctx.counters.stale_events += 1;
                warn!("{now}: discarded stale {name} for {property} ({agent})");
                self.ctx
                    .critical(format!("stale {name} for {property} discarded; {agent} released"));
            }
            Err(HandlerError::Schedule(e)) => return Err(SimError::Schedule(e)),
            Err(HandlerError::Entity(e)) => return Err(SimError::Entity(e)),
        }

        self.ctx.counters.events_processed += 1;
        let processed = self.ctx.counters.events_processed;
        if processed % PROGRESS_INTERVAL == 0 {
            info!(
                "{processed} events, clock {}, {} sold, {} pending",
                self.ctx.queue.clock(),
                self.ctx.counters.sold,
                self.ctx.queue.len(),
            );
        }

        observer.on_event(&event);
        self.ctx.log.flush(|record| observer.on_activity(record));
        Ok(Step::Processed(event))
    }

    /// Terminal reconciliation: release every blocked agent at the final
    /// clock so their blocked time counts, then build the report.
    pub fn finish<O: SimObserver>(&mut self, observer: &mut O) -> MetricsReport {
        let now = self.ctx.now();
        let released = self.ctx.store.agents.force_release_all(now);
        if released > 0 {
            self.ctx.routine(format!("run ends with {released} agents force-released"));
        }
        self.ctx.log.flush(|record| observer.on_activity(record));
        self.stopped = true;

        let report = MetricsReport::collect(&self.ctx, released);
        info!(
            "run end at {}: {} arrivals, {} sold, {} lost sales, {} events",
            self.ctx.queue.clock(),
            report.counters.arrivals,
            report.counters.sold,
            report.counters.lost_sales(),
            report.counters.events_processed,
        );
        observer.on_sim_end(&report);
        report
    }
}
