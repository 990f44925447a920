//! `re-queue` — the simulation clock and its pending-event queue.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`event`]   | `EventKind` (one variant per funnel stage), `ScheduledEvent` |
//! | [`queue`]   | `EventQueue` — min-heap on `(at, seq)` plus the `SimClock`    |
//! | [`error`]   | `QueueError`, `QueueResult<T>`                                |
//!
//! # Ordering model (summary)
//!
//! ```text
//! schedule(at, kind)  → seq = next_seq++; push (at, seq, kind)
//! pop_next()          → smallest (at, seq); clock ← at
//! ```
//!
//! Two events at the same instant come out in the order they were
//! scheduled.  Stage handlers rely on this: an arrival and a stage
//! completion at the same minute must resolve the same way on every run.

pub mod error;
pub mod event;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{QueueError, QueueResult};
pub use event::{EventKind, ScheduledEvent};
pub use queue::EventQueue;
