//! `re-core` — foundational types for the realty pipeline simulator.
//!
//! This crate is a dependency of every other `re-*` crate.  It has no `re-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde`, `csv`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `PropertyId`, `AgentId`                                    |
//! | [`time`]        | `SimTime` (minutes), `SimClock`, duration formatting       |
//! | [`rng`]         | `SimRng`, `RngStream`                                      |
//! | [`config`]      | `PipelineConfig` and its nested sections, validation       |
//! | [`loader`]      | parameter-override CSV, listing-count CSV                  |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |

pub mod config;
pub mod error;
pub mod ids;
pub mod loader;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ArrivalConfig, BusinessHoursConfig, OutcomeProbabilities, PipelineConfig, StageDurations,
    TriangularParams,
};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, PropertyId};
pub use loader::{
    count_listings_csv, count_listings_reader, load_overrides_csv, load_overrides_reader,
    ParameterOverride,
};
pub use rng::{RngStream, SimRng};
pub use time::{format_hhmm, format_span_hours, SimClock, SimTime, MINUTES_PER_DAY};
