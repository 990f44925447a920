//! CSV inputs from the listing pipeline.
//!
//! The listing fetcher and the CSV normaliser live outside this workspace.
//! The simulator takes exactly two things from them:
//!
//! 1. **Listing count**: the number of data rows in the cleaned listings CSV
//!    becomes `PipelineConfig::initial_properties`.  Column contents are not
//!    inspected.
//! 2. **Parameter overrides**: an optional two-column CSV of stage durations
//!    and probabilities measured upstream:
//!
//! ```csv
//! parameter,value
//! visit,75
//! verification,21600
//! sale,0.09
//! ```
//!
//! | `parameter`         | Field                                         |
//! |---------------------|-----------------------------------------------|
//! | `visit`, `first_contact`, `paperwork`, `offers`, `verification`, `notarization`, `renegotiation` | `durations.*` (minutes) |
//! | `sale`, `remorse`, `reengage_base`, `reengage_penalty` | `probabilities.*` |
//! | `interval_minutes`  | fixed arrival interval (fixed policy only)    |
//!
//! Overrides are applied in file order; run [`PipelineConfig::validate`]
//! afterwards.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ArrivalConfig, CoreError, CoreResult, PipelineConfig};

// ── Parameter overrides ───────────────────────────────────────────────────────

/// One `parameter,value` row.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ParameterOverride {
    pub parameter: String,
    pub value:     f64,
}

impl ParameterOverride {
    /// Write this override into `config`.
    pub fn apply(&self, config: &mut PipelineConfig) -> CoreResult<()> {
        let d = &mut config.durations;
        let p = &mut config.probabilities;
        let slot = match self.parameter.trim() {
            "visit"            => &mut d.visit,
            "first_contact"    => &mut d.first_contact,
            "paperwork"        => &mut d.paperwork,
            "offers"           => &mut d.offers,
            "verification"     => &mut d.verification,
            "notarization"     => &mut d.notarization,
            "renegotiation"    => &mut d.renegotiation,
            "sale"             => &mut p.sale,
            "remorse"          => &mut p.remorse,
            "reengage_base"    => &mut p.reengage_base,
            "reengage_penalty" => &mut p.reengage_penalty,
            "interval_minutes" => match &mut config.arrivals {
                ArrivalConfig::Fixed { interval_minutes } => interval_minutes,
                ArrivalConfig::Triangular(_) => {
                    return Err(CoreError::Config(
                        "interval_minutes override needs the fixed arrival policy".to_owned(),
                    ));
                }
            },
            other => {
                return Err(CoreError::Parse(format!("unknown parameter {other:?}")));
            }
        };
        *slot = self.value;
        Ok(())
    }
}

/// Load parameter overrides from a CSV file.
pub fn load_overrides_csv(path: &Path) -> CoreResult<Vec<ParameterOverride>> {
    let file = std::fs::File::open(path)?;
    load_overrides_reader(file)
}

/// Like [`load_overrides_csv`] but accepts any `Read` source.
pub fn load_overrides_reader<R: Read>(reader: R) -> CoreResult<Vec<ParameterOverride>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<ParameterOverride>()
        .map(|row| row.map_err(|e| CoreError::Parse(e.to_string())))
        .collect()
}

// ── Listing count ─────────────────────────────────────────────────────────────

/// Count the data rows (header excluded) of a cleaned listings CSV.
pub fn count_listings_csv(path: &Path) -> CoreResult<u64> {
    let file = std::fs::File::open(path)?;
    count_listings_reader(file)
}

/// Like [`count_listings_csv`] but accepts any `Read` source.
pub fn count_listings_reader<R: Read>(reader: R) -> CoreResult<u64> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut count = 0u64;
    for record in csv_reader.records() {
        record.map_err(|e| CoreError::Parse(e.to_string()))?;
        count += 1;
    }
    Ok(count)
}
