//! Run counters and loss causes.

use serde::Serialize;

/// Why an arrival did not end in a sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossCause {
    /// Arrived outside business hours.
    OutOfHours,
    /// Every active property was already mid-funnel.
    NoIdleProperty,
    /// No agent was free to show the property.
    NoAgent,
    /// The visit ended without a sale.
    Unconverted,
    /// The agent already tracked the maximum number of verifications.
    VerificationSaturated,
    /// Buyer remorse that renegotiation could not undo.
    RenegotiationExhausted,
}

impl LossCause {
    pub const ALL: [LossCause; 6] = [
        LossCause::OutOfHours,
        LossCause::NoIdleProperty,
        LossCause::NoAgent,
        LossCause::Unconverted,
        LossCause::VerificationSaturated,
        LossCause::RenegotiationExhausted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LossCause::OutOfHours             => "out_of_hours",
            LossCause::NoIdleProperty         => "no_idle_property",
            LossCause::NoAgent                => "no_agent",
            LossCause::Unconverted            => "unconverted",
            LossCause::VerificationSaturated  => "verification_saturated",
            LossCause::RenegotiationExhausted => "renegotiation_exhausted",
        }
    }

    /// `true` for causes that lose a sale already agreed, as opposed to a
    /// visit that never became one.
    pub fn is_lost_sale(self) -> bool {
        matches!(self, LossCause::VerificationSaturated | LossCause::RenegotiationExhausted)
    }
}

/// Everything the handlers count while the run is in progress.
///
/// Every arrival ends up in exactly one of `sold`, one loss cause, or still
/// in flight when the run stops.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Counters {
    pub arrivals: u64,
    pub sold:     u64,

    pub out_of_hours:            u64,
    pub no_idle_property:        u64,
    pub no_agent:                u64,
    pub unconverted:             u64,
    pub verification_saturated:  u64,
    pub renegotiation_exhausted: u64,

    /// Buyers who regretted after paperwork.
    pub remorse:               u64,
    /// Renegotiations that sent the sale on to verification.
    pub reengagement_wins:     u64,
    /// Times a verified property found its agent busy.
    pub notarization_retries:  u64,
    pub replacements_created:  u64,
    pub stale_events:          u64,
    pub double_block_attempts: u64,
    pub events_processed:      u64,
}

impl Counters {
    pub fn record_loss(&mut self, cause: LossCause) {
        *self.slot(cause) += 1;
    }

    pub fn losses(&self, cause: LossCause) -> u64 {
        match cause {
            LossCause::OutOfHours             => self.out_of_hours,
            LossCause::NoIdleProperty         => self.no_idle_property,
            LossCause::NoAgent                => self.no_agent,
            LossCause::Unconverted            => self.unconverted,
            LossCause::VerificationSaturated  => self.verification_saturated,
            LossCause::RenegotiationExhausted => self.renegotiation_exhausted,
        }
    }

    pub fn total_losses(&self) -> u64 {
        LossCause::ALL.iter().map(|&c| self.losses(c)).sum()
    }

    /// Agreed sales that fell through.
    pub fn lost_sales(&self) -> u64 {
        LossCause::ALL
            .iter()
            .filter(|c| c.is_lost_sale())
            .map(|&c| self.losses(c))
            .sum()
    }

    /// Arrivals that reached a terminal outcome.
    pub fn resolved(&self) -> u64 {
        self.sold + self.total_losses()
    }

    fn slot(&mut self, cause: LossCause) -> &mut u64 {
        match cause {
            LossCause::OutOfHours             => &mut self.out_of_hours,
            LossCause::NoIdleProperty         => &mut self.no_idle_property,
            LossCause::NoAgent                => &mut self.no_agent,
            LossCause::Unconverted            => &mut self.unconverted,
            LossCause::VerificationSaturated  => &mut self.verification_saturated,
            LossCause::RenegotiationExhausted => &mut self.renegotiation_exhausted,
        }
    }
}
