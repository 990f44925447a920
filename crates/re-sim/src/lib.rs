//! `re-sim` — event loop orchestrator for the pipeline simulator.
//!
//! # Event loop
//!
//! ```text
//! build:  validate config → seed properties and agents → schedule first arrival
//! loop:   pop earliest event (stop past the horizon or when drained)
//!         dispatch by EventKind to its stage handler
//!         handler mutates SimContext and schedules follow-ups
//!         flush activity records to the observer
//! finish: force-release blocked agents → MetricsReport → observer.on_sim_end
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`context`]  | `SimContext` — queue, store, policy, RNG streams, counters |
//! | [`handlers`] | one handler per funnel stage, plus `dispatch`           |
//! | [`sim`]      | `Sim` driver, `Step`                                    |
//! | [`builder`]  | `SimBuilder`                                            |
//! | [`observer`] | `SimObserver`, `NoopObserver`                           |
//! | [`counters`] | `Counters`, `LossCause`                                 |
//! | [`activity`] | `ActivityLog`, `ActivityRecord`, `Severity`             |
//! | [`metrics`]  | `MetricsReport` and its parts                           |
//! | [`error`]    | `SimError`, `HandlerError`                              |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                  |
//! |-----------|-----------------------------------------|
//! | `fx-hash` | FxHash property pools in `re-entity`.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use re_core::PipelineConfig;
//! use re_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(PipelineConfig::default()).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("{report}");
//! ```

pub mod activity;
pub mod builder;
pub mod context;
pub mod counters;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod observer;
pub mod sim;


pub use activity::{ActivityLog, ActivityRecord, Severity};
pub use builder::SimBuilder;
pub use context::SimContext;
pub use counters::{Counters, LossCause};
pub use error::{HandlerError, HandlerResult, SimError, SimResult};
pub use metrics::{AgentReport, MetricsReport, Spread, Turnover, VisitStats};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, Step, PROGRESS_INTERVAL};
