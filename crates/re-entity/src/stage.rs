//! Finite-state enums for properties and agents.
//!
//! ```text
//! Idle ──► Visiting ──► Paperwork ──► Verification ──► Notarization ──► Sold
//!  ▲          │             │              ▲
//!  │          │             ▼              │
//!  └──────────┴──────── Renegotiation ─────┘
//!                           │
//!                           ▼
//!                          Lost
//! ```
//!
//! `Sold` and `Lost` are terminal.  `Renegotiation → Lost` only happens when
//! the run is configured to expire properties after a failed renegotiation.

use re_core::{PropertyId, SimTime};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyStage {
    Idle,
    Visiting,
    Paperwork,
    Renegotiation,
    Verification,
    Notarization,
    Sold,
    Lost,
}

impl PropertyStage {
    /// The transition table.  Self-transitions are not allowed.
    pub fn can_transition_to(self, to: PropertyStage) -> bool {
        use PropertyStage::*;
        matches!(
            (self, to),
            (Idle, Visiting)
                | (Visiting, Paperwork)
                | (Visiting, Idle)
                | (Paperwork, Renegotiation)
                | (Paperwork, Verification)
                | (Renegotiation, Verification)
                | (Renegotiation, Idle)
                | (Renegotiation, Lost)
                | (Verification, Notarization)
                | (Notarization, Sold)
        )
    }

    /// Stages during which one agent is blocked on the property.
    pub fn is_agent_owned(self) -> bool {
        matches!(
            self,
            PropertyStage::Visiting
                | PropertyStage::Paperwork
                | PropertyStage::Renegotiation
                | PropertyStage::Notarization
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PropertyStage::Sold | PropertyStage::Lost)
    }

    pub fn name(self) -> &'static str {
        match self {
            PropertyStage::Idle          => "idle",
            PropertyStage::Visiting      => "visiting",
            PropertyStage::Paperwork     => "paperwork",
            PropertyStage::Renegotiation => "renegotiation",
            PropertyStage::Verification  => "verification",
            PropertyStage::Notarization  => "notarization",
            PropertyStage::Sold          => "sold",
            PropertyStage::Lost          => "lost",
        }
    }
}

/// Whether an agent is free to take a new blocking task.
///
/// Pending verifications are tracked separately and do not affect this.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum AgentState {
    #[default]
    Available,
    Blocked { property: PropertyId, since: SimTime },
}

impl AgentState {
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, AgentState::Available)
    }

    /// Property the agent is blocked on, if any.
    pub fn property(&self) -> Option<PropertyId> {
        match self {
            AgentState::Available => None,
            AgentState::Blocked { property, .. } => Some(*property),
        }
    }
}
