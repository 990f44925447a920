//! `re-policy` — the stochastic decisions of the sales funnel.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`outcome`]    | `OutcomePolicy` trait, `BernoulliPolicy`, `reengage_probability` |
//! | [`scripted`]   | `ScriptedPolicy` — fixed decision sequences for tests        |
//! | [`arrival`]    | `Triangular` sampler, `ArrivalGenerator`                     |
//! | [`hours`]      | `BusinessHours` gate                                         |
//! | [`commission`] | `CommissionSchedule` — minimum commission after renegotiation |
//!
//! # Design notes
//!
//! Every decision takes the caller's `&mut SimRng`.  Policies hold no RNG of
//! their own, so the driver decides which stream each decision consumes and a
//! policy swap never shifts another stream's sequence.

pub mod arrival;
pub mod commission;
pub mod hours;
pub mod outcome;
pub mod scripted;

#[cfg(test)]
mod tests;

pub use arrival::{ArrivalGenerator, Triangular};
pub use commission::CommissionSchedule;
pub use hours::BusinessHours;
pub use outcome::{reengage_probability, BernoulliPolicy, OutcomePolicy, REENGAGE_FLOOR};
pub use scripted::ScriptedPolicy;
