//! Fluent builder for constructing a [`Sim`].

use log::debug;
use re_core::PipelineConfig;
use re_entity::EntityStoreBuilder;
use re_policy::{BernoulliPolicy, OutcomePolicy};
use re_queue::EventKind;

use crate::{Sim, SimContext, SimError, SimResult};

/// Fluent builder for [`Sim<P>`].
///
/// # Inputs
///
/// | Method          | Default                                           |
/// |-----------------|---------------------------------------------------|
/// | `new(config)`   | required                                          |
/// | `.policy(p)`    | `BernoulliPolicy` over `config.probabilities`     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config).build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// println!("{report}");
/// ```
pub struct SimBuilder<P: OutcomePolicy = BernoulliPolicy> {
    config: PipelineConfig,
    policy: P,
}

impl SimBuilder<BernoulliPolicy> {
    pub fn new(config: PipelineConfig) -> Self {
        let policy = BernoulliPolicy::new(config.probabilities.clone());
        Self { config, policy }
    }
}

impl<P: OutcomePolicy> SimBuilder<P> {
    /// Replace the outcome policy.
    pub fn policy<Q: OutcomePolicy>(self, policy: Q) -> SimBuilder<Q> {
        SimBuilder { config: self.config, policy }
    }

    /// Validate the configuration, seed the stores, schedule the first
    /// arrival, and return a ready-to-run [`Sim`].
    ///
    /// Nothing is scheduled if validation fails.
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let store = EntityStoreBuilder::new(self.config.agent_count as usize)
            .initial_properties(self.config.initial_properties)
            .verification_cap(self.config.verification_cap)
            .build();

        let mut ctx = SimContext::new(self.config, store, self.policy);
        let first = ctx.arrivals.next_gap(&mut ctx.rng_arrivals);
        ctx.queue.schedule_after(first, EventKind::Arrival)?;
        debug!("first arrival at {}", ctx.queue.peek_time().unwrap_or_default());

        Ok(Sim::new(ctx))
    }
}
