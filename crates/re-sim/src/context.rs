//! `SimContext` — all mutable state of one run, passed to every handler.

use re_core::{PipelineConfig, RngStream, SimRng, SimTime};
use re_entity::EntityStore;
use re_policy::{ArrivalGenerator, BusinessHours, OutcomePolicy};
use re_queue::EventQueue;

use crate::{ActivityLog, Counters, LossCause, Severity};

/// One run's world.  Replications are separate contexts; nothing is shared.
pub struct SimContext<P: OutcomePolicy> {
    pub config:   PipelineConfig,
    pub queue:    EventQueue,
    pub store:    EntityStore,
    pub policy:   P,
    pub arrivals: ArrivalGenerator,
    pub hours:    BusinessHours,

    /// Inter-arrival gaps.
    pub rng_arrivals:  SimRng,
    /// Idle-property picks.
    pub rng_selection: SimRng,
    /// Sale, remorse and re-engagement rolls.
    pub rng_outcomes:  SimRng,

    pub counters: Counters,
    pub log:      ActivityLog,
}

impl<P: OutcomePolicy> SimContext<P> {
    pub(crate) fn new(config: PipelineConfig, store: EntityStore, policy: P) -> Self {
        let seed = config.seed;
        Self {
            queue:         EventQueue::new(),
            store,
            policy,
            arrivals:      ArrivalGenerator::from_config(&config.arrivals),
            hours:         BusinessHours::new(config.business_hours),
            rng_arrivals:  SimRng::for_stream(seed, RngStream::Arrivals),
            rng_selection: SimRng::for_stream(seed, RngStream::Selection),
            rng_outcomes:  SimRng::for_stream(seed, RngStream::Outcomes),
            counters:      Counters::default(),
            log:           ActivityLog::new(config.verbose_log),
            config,
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        SimTime(self.config.horizon_minutes)
    }

    pub(crate) fn routine(&mut self, message: String) {
        let now = self.now();
        self.log.push(now, Severity::Routine, message);
    }

    pub(crate) fn critical(&mut self, message: String) {
        let now = self.now();
        self.log.push(now, Severity::Critical, message);
    }

    pub(crate) fn lose(&mut self, cause: LossCause, message: String) {
        self.counters.record_loss(cause);
        if cause == LossCause::NoIdleProperty || cause.is_lost_sale() {
            self.critical(message);
        } else {
            self.routine(message);
        }
    }
}
