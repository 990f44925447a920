//! Event types.

use std::cmp::Ordering;

use re_core::{AgentId, PropertyId, SimTime};

/// What happens when an event fires.
///
/// Every non-arrival event names the property it concerns and the agent who
/// handled the stage that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A prospective buyer asks to see a property.
    Arrival,

    /// The agent finishes showing `property`; the sale roll happens now.
    VisitDone { property: PropertyId, agent: AgentId },

    /// Sale paperwork is done; the remorse roll happens now.
    PaperworkDone { property: PropertyId, agent: AgentId },

    /// A renegotiation after buyer remorse concludes.
    RenegotiationDone { property: PropertyId, agent: AgentId },

    /// The verification dwell is over.  `agent` is the agent tracking it.
    VerificationDone { property: PropertyId, agent: AgentId },

    /// A verified property checks again whether its agent is free to take
    /// it to the notary.
    NotarizationRetry { property: PropertyId, agent: AgentId },

    /// The deed is signed.
    NotarizationDone { property: PropertyId, agent: AgentId },
}

impl EventKind {
    /// Short stable name, used in logs and output files.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Arrival                  => "arrival",
            EventKind::VisitDone { .. }         => "visit_done",
            EventKind::PaperworkDone { .. }     => "paperwork_done",
            EventKind::RenegotiationDone { .. } => "renegotiation_done",
            EventKind::VerificationDone { .. }  => "verification_done",
            EventKind::NotarizationRetry { .. } => "notarization_retry",
            EventKind::NotarizationDone { .. }  => "notarization_done",
        }
    }

    /// `(property, agent)` for stage events, `None` for arrivals.
    pub fn subjects(&self) -> Option<(PropertyId, AgentId)> {
        match *self {
            EventKind::Arrival => None,
            EventKind::VisitDone { property, agent }
            | EventKind::PaperworkDone { property, agent }
            | EventKind::RenegotiationDone { property, agent }
            | EventKind::VerificationDone { property, agent }
            | EventKind::NotarizationRetry { property, agent }
            | EventKind::NotarizationDone { property, agent } => Some((property, agent)),
        }
    }
}

/// An event together with its firing time and insertion sequence number.
///
/// Ordered so that `BinaryHeap<ScheduledEvent>` (a max-heap) pops the
/// smallest `(at, seq)` first.  The payload takes no part in the ordering.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub at:   SimTime,
    pub seq:  u64,
    pub kind: EventKind,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
