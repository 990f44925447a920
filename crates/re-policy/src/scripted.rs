//! `ScriptedPolicy` — replays fixed decision sequences.
//!
//! Each decision kind has its own script, consumed in order and repeated
//! from the start when exhausted.  An empty script always answers `false`.
//! The RNG is never touched, so swapping a `BernoulliPolicy` for a
//! `ScriptedPolicy` leaves the other streams' sequences unchanged.

use std::sync::atomic::{AtomicUsize, Ordering};

use re_core::SimRng;
use re_entity::Property;

use crate::OutcomePolicy;

#[derive(Debug, Default)]
pub struct ScriptedPolicy {
    sales:    Script,
    regrets:  Script,
    reengage: Script,
}

impl ScriptedPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every decision answers with the given constant.
    pub fn constant(sale: bool, regret: bool, reengage: bool) -> Self {
        Self::new()
            .with_sales(vec![sale])
            .with_regrets(vec![regret])
            .with_reengagements(vec![reengage])
    }

    pub fn with_sales(mut self, script: Vec<bool>) -> Self {
        self.sales = Script::new(script);
        self
    }

    pub fn with_regrets(mut self, script: Vec<bool>) -> Self {
        self.regrets = Script::new(script);
        self
    }

    pub fn with_reengagements(mut self, script: Vec<bool>) -> Self {
        self.reengage = Script::new(script);
        self
    }
}

impl OutcomePolicy for ScriptedPolicy {
    fn sale_closes(&self, _property: &Property, _rng: &mut SimRng) -> bool {
        self.sales.next()
    }

    fn client_regrets(&self, _property: &Property, _rng: &mut SimRng) -> bool {
        self.regrets.next()
    }

    fn reengages(&self, property: &Property, max_attempts: u32, _rng: &mut SimRng) -> bool {
        if property.renegotiations >= max_attempts {
            return false;
        }
        self.reengage.next()
    }
}

#[derive(Debug, Default)]
struct Script {
    answers: Vec<bool>,
    cursor:  AtomicUsize,
}

impl Script {
    fn new(answers: Vec<bool>) -> Self {
        Self { answers, cursor: AtomicUsize::new(0) }
    }

    fn next(&self) -> bool {
        if self.answers.is_empty() {
            return false;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.answers[i % self.answers.len()]
    }
}
