//! The `Property` record.

use re_core::{AgentId, PropertyId, SimTime};

use crate::{EntityError, EntityResult, PropertyStage};

/// One listing moving through the sales funnel.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub id:    PropertyId,
    pub stage: PropertyStage,

    /// Times an arrival selected this property, whether or not an agent was
    /// free to show it.
    pub visits: u32,

    /// Renegotiations started in the current sale attempt.  Reset when the
    /// property returns to idle.
    pub renegotiations: u32,

    /// Start of the most recent agent-led visit.
    pub last_visit_at: Option<SimTime>,

    /// Set when the verification dwell completes.  Notarization refuses to
    /// start without it.
    pub passed_verification: bool,

    /// `true` from a successful sale roll until the sale closes or falls
    /// through.
    pub in_sale: bool,

    /// Agent that owns (or, during verification, tracks) the property.
    pub agent: Option<AgentId>,

    pub created_at: SimTime,

    /// When the property reached `Sold` or `Lost`.
    pub closed_at: Option<SimTime>,
}

impl Property {
    pub fn new(id: PropertyId, created_at: SimTime) -> Self {
        Self {
            id,
            stage:               PropertyStage::Idle,
            visits:              0,
            renegotiations:      0,
            last_visit_at:       None,
            passed_verification: false,
            in_sale:             false,
            agent:               None,
            created_at,
            closed_at:           None,
        }
    }

    /// Move to `to`, checking the transition table.
    pub fn transition(&mut self, to: PropertyStage) -> EntityResult<()> {
        if !self.stage.can_transition_to(to) {
            return Err(EntityError::IllegalTransition {
                property: self.id,
                from:     self.stage,
                to,
            });
        }
        self.stage = to;
        Ok(())
    }

    /// Clear the per-attempt sale state.  The visit counter survives.
    pub(crate) fn reset_sale_state(&mut self) {
        self.renegotiations = 0;
        self.passed_verification = false;
        self.in_sale = false;
        self.agent = None;
    }

    /// Minutes from the start of the selling visit to `closed_at`.
    pub fn time_to_sale(&self) -> Option<f64> {
        if self.stage != PropertyStage::Sold {
            return None;
        }
        Some(self.closed_at?.since(self.last_visit_at?))
    }
}
