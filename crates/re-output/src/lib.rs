//! `re-output` — run output writers for the pipeline simulator.
//!
//! | Backend | Files created                                                 |
//! |---------|---------------------------------------------------------------|
//! | CSV     | `activity_log.csv`, `agent_utilization.csv`, `summary.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `re_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use re_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ActivityRow, AgentUtilizationRow, SummaryRow};
pub use writer::OutputWriter;
