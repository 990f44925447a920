//! The `OutcomePolicy` trait and its probabilistic implementation.

use re_core::{OutcomeProbabilities, SimRng};
use re_entity::Property;

/// Lowest re-engagement probability, however many attempts came before.
pub const REENGAGE_FLOOR: f64 = 0.1;

/// `max(0.1, base - attempts * penalty)`.
#[inline]
pub fn reengage_probability(base: f64, attempts: u32, penalty: f64) -> f64 {
    (base - f64::from(attempts) * penalty).max(REENGAGE_FLOOR)
}

/// The three branch points of the funnel.
///
/// Each method receives the property being decided on and the outcome RNG
/// stream.  Implementations must not mutate anything; the stage handlers
/// apply the consequences.
///
/// # Thread safety
///
/// The simulation is single-threaded, but `Sim` is `Send` so a caller can
/// move a whole run to a worker thread.  Hence `Send + Sync`.
pub trait OutcomePolicy: Send + Sync + 'static {
    /// Evaluated when a visit ends: does the visitor buy?
    fn sale_closes(&self, property: &Property, rng: &mut SimRng) -> bool;

    /// Evaluated after paperwork: does the buyer back out?
    fn client_regrets(&self, property: &Property, rng: &mut SimRng) -> bool;

    /// Evaluated when a renegotiation ends: is the buyer won back?
    ///
    /// `property.renegotiations` counts earlier successful re-engagements in
    /// this sale attempt.  Must return `false` once it reaches
    /// `max_attempts`.
    fn reengages(&self, property: &Property, max_attempts: u32, rng: &mut SimRng) -> bool;
}

/// Independent Bernoulli trials with the configured probabilities.
#[derive(Clone, Debug)]
pub struct BernoulliPolicy {
    probabilities: OutcomeProbabilities,
}

impl BernoulliPolicy {
    pub fn new(probabilities: OutcomeProbabilities) -> Self {
        Self { probabilities }
    }

    pub fn probabilities(&self) -> &OutcomeProbabilities {
        &self.probabilities
    }
}

impl OutcomePolicy for BernoulliPolicy {
    fn sale_closes(&self, _property: &Property, rng: &mut SimRng) -> bool {
        rng.chance(self.probabilities.sale)
    }

    fn client_regrets(&self, _property: &Property, rng: &mut SimRng) -> bool {
        rng.chance(self.probabilities.remorse)
    }

    fn reengages(&self, property: &Property, max_attempts: u32, rng: &mut SimRng) -> bool {
        // Exhausted attempts do not consume a draw.
        if property.renegotiations >= max_attempts {
            return false;
        }
        let p = reengage_probability(
            self.probabilities.reengage_base,
            property.renegotiations,
            self.probabilities.reengage_penalty,
        );
        rng.chance(p)
    }
}
