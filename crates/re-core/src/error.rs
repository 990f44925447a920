//! Configuration and input error type.
//!
//! Every variant here is fatal at startup: the simulator refuses to schedule
//! a single event from a configuration that fails [`PipelineConfig::validate`]
//! or from input files that cannot be parsed.
//!
//! [`PipelineConfig::validate`]: crate::PipelineConfig::validate

use thiserror::Error;

/// The top-level error type for `re-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for the `re-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
