//! Run configuration.
//!
//! `PipelineConfig` is what the application loads (JSON via `serde_json` in
//! the runner) and hands to `re_sim::SimBuilder`.  Every field has a default,
//! so a config file only needs the keys it changes.  The defaults reproduce
//! the reference office: 80 agents, ~9.5 K active listings, a 7 % chance that
//! a visit ends in a sale, and a 30-day verification window.
//!
//! All durations are in minutes.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, MINUTES_PER_DAY};

// ── Stage durations ───────────────────────────────────────────────────────────

/// Per-stage durations in minutes.
///
/// Visit and paperwork are composites: the agent spends `visit +
/// first_contact` on a visit and `paperwork + offers` on paperwork.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageDurations {
    pub visit:         f64,
    pub first_contact: f64,
    pub paperwork:     f64,
    pub offers:        f64,
    pub verification:  f64,
    pub notarization:  f64,
    pub renegotiation: f64,
}

impl StageDurations {
    /// Time an agent is blocked by one visit.
    #[inline]
    pub fn visit_total(&self) -> f64 {
        self.visit + self.first_contact
    }

    /// Time an agent is blocked by paperwork after a sale.
    #[inline]
    pub fn paperwork_total(&self) -> f64 {
        self.paperwork + self.offers
    }

    fn components(&self) -> [(&'static str, f64); 7] {
        [
            ("visit", self.visit),
            ("first_contact", self.first_contact),
            ("paperwork", self.paperwork),
            ("offers", self.offers),
            ("verification", self.verification),
            ("notarization", self.notarization),
            ("renegotiation", self.renegotiation),
        ]
    }
}

impl Default for StageDurations {
    fn default() -> Self {
        Self {
            visit:         90.0,
            first_contact: 80.0,
            paperwork:     120.0,
            offers:        90.0,
            verification:  43_200.0, // 30 days
            notarization:  150.0,
            renegotiation: 50.0,
        }
    }
}

// ── Outcome probabilities ─────────────────────────────────────────────────────

/// Probabilities driving the funnel's branches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeProbabilities {
    /// A finished visit turns into a sale.
    pub sale: f64,
    /// The buyer backs out once paperwork is done.
    pub remorse: f64,
    /// Base chance that a renegotiation revives the sale.
    pub reengage_base: f64,
    /// Subtracted from `reengage_base` per prior renegotiation attempt.
    pub reengage_penalty: f64,
}

impl Default for OutcomeProbabilities {
    fn default() -> Self {
        Self {
            sale:             0.07,
            remorse:          0.2,
            reengage_base:    0.3,
            reengage_penalty: 0.1,
        }
    }
}

// ── Arrivals ──────────────────────────────────────────────────────────────────

/// Bounds of a triangular distribution: `lower <= mode <= upper`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangularParams {
    pub lower: f64,
    pub mode:  f64,
    pub upper: f64,
}

impl TriangularParams {
    pub fn new(lower: f64, mode: f64, upper: f64) -> Self {
        Self { lower, mode, upper }
    }

    /// Build from the (shape, location, scale) parameterisation produced by
    /// common fitting libraries: `lower = loc`, `upper = loc + scale`,
    /// `mode = loc + c * scale`.
    pub fn from_shape(c: f64, loc: f64, scale: f64) -> Self {
        Self {
            lower: loc,
            mode:  loc + c * scale,
            upper: loc + scale,
        }
    }

    /// `(a + m + b) / 3`.
    #[inline]
    pub fn mean(&self) -> f64 {
        (self.lower + self.mode + self.upper) / 3.0
    }

    /// CDF value at the mode, `(m - a) / (b - a)`: the branch point of the
    /// inverse transform.
    #[inline]
    pub fn mode_fraction(&self) -> f64 {
        (self.mode - self.lower) / (self.upper - self.lower)
    }
}

/// How the gap between consecutive visit arrivals is produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArrivalConfig {
    Fixed { interval_minutes: f64 },
    Triangular(TriangularParams),
}

impl ArrivalConfig {
    /// The interval the driver uses to decide whether one more arrival still
    /// fits before the horizon.  For the triangular policy this is the mean.
    pub fn mean_interval(&self) -> f64 {
        match self {
            ArrivalConfig::Fixed { interval_minutes } => *interval_minutes,
            ArrivalConfig::Triangular(t) => t.mean(),
        }
    }
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        ArrivalConfig::Fixed { interval_minutes: 22.31 }
    }
}

// ── Business hours ────────────────────────────────────────────────────────────

/// Daily window `[open_minute, close_minute)` during which visits are served.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessHoursConfig {
    pub open_minute:  f64,
    pub close_minute: f64,
}

impl BusinessHoursConfig {
    /// Window from whole hours, e.g. `from_hours(9, 18)` for 09:00–18:00.
    pub fn from_hours(open: u32, close: u32) -> Self {
        Self {
            open_minute:  f64::from(open) * 60.0,
            close_minute: f64::from(close) * 60.0,
        }
    }

    #[inline]
    pub fn open_minutes_per_day(&self) -> f64 {
        self.close_minute - self.open_minute
    }
}

// ── PipelineConfig ────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Run length in minutes.  Events after this instant are never processed.
    pub horizon_minutes: f64,

    /// Size of the agent pool.  Fixed for the whole run.
    pub agent_count: u32,

    /// Properties in the active pool at time zero.
    pub initial_properties: u64,

    /// Renegotiation attempts allowed per sale before it is given up.
    pub max_renegotiations: u32,

    /// Properties one agent may have pending verification at once.  A sale
    /// that would push an agent past this is rejected.
    pub verification_cap: usize,

    /// Create one new listing for every property sold.
    pub replenish: bool,

    /// Retire (rather than relist) a property whose renegotiation fails.
    /// Only valid with `replenish = false`.
    pub expire_on_failed_renegotiation: bool,

    /// Keep routine activity records, not just critical ones.
    pub verbose_log: bool,

    /// How long a verified property waits before checking again whether its
    /// agent is free for notarization.
    pub notarization_retry_minutes: f64,

    pub durations: StageDurations,

    pub probabilities: OutcomeProbabilities,

    pub arrivals: ArrivalConfig,

    /// `None` serves visits around the clock.
    pub business_hours: Option<BusinessHoursConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed:                           42,
            horizon_minutes:                8_760.0 * 60.0, // one year
            agent_count:                    80,
            initial_properties:             9_537,
            max_renegotiations:             3,
            verification_cap:               3,
            replenish:                      true,
            expire_on_failed_renegotiation: false,
            verbose_log:                    false,
            notarization_retry_minutes:     5.0,
            durations:                      StageDurations::default(),
            probabilities:                  OutcomeProbabilities::default(),
            arrivals:                       ArrivalConfig::default(),
            business_hours:                 None,
        }
    }
}

impl PipelineConfig {
    /// Check every option for range and consistency.
    ///
    /// Called by the simulation builder before anything is scheduled.
    pub fn validate(&self) -> CoreResult<()> {
        if self.agent_count == 0 {
            return Err(config_err("agent_count must be at least 1"));
        }
        if !(self.horizon_minutes.is_finite() && self.horizon_minutes > 0.0) {
            return Err(config_err(format!(
                "horizon_minutes must be a positive number, got {}",
                self.horizon_minutes
            )));
        }

        let p = &self.probabilities;
        for (name, value) in [
            ("sale", p.sale),
            ("remorse", p.remorse),
            ("reengage_base", p.reengage_base),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(config_err(format!(
                    "probability {name} must be in [0, 1], got {value}"
                )));
            }
        }
        if !(p.reengage_penalty.is_finite() && p.reengage_penalty >= 0.0) {
            return Err(config_err(format!(
                "reengage_penalty must be non-negative, got {}",
                p.reengage_penalty
            )));
        }

        for (name, value) in self.durations.components() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(config_err(format!(
                    "duration {name} must be a non-negative number of minutes, got {value}"
                )));
            }
        }
        if !(self.notarization_retry_minutes.is_finite() && self.notarization_retry_minutes > 0.0) {
            return Err(config_err(format!(
                "notarization_retry_minutes must be positive, got {}",
                self.notarization_retry_minutes
            )));
        }

        match &self.arrivals {
            ArrivalConfig::Fixed { interval_minutes } => {
                if !(interval_minutes.is_finite() && *interval_minutes > 0.0) {
                    return Err(config_err(format!(
                        "fixed arrival interval must be positive, got {interval_minutes}"
                    )));
                }
            }
            ArrivalConfig::Triangular(t) => {
                let finite = t.lower.is_finite() && t.mode.is_finite() && t.upper.is_finite();
                if !finite || t.lower < 0.0 || t.lower > t.mode || t.mode > t.upper || t.lower >= t.upper {
                    return Err(config_err(format!(
                        "triangular arrivals need 0 <= lower <= mode <= upper with lower < upper, \
                         got ({}, {}, {})",
                        t.lower, t.mode, t.upper
                    )));
                }
            }
        }

        if let Some(hours) = &self.business_hours {
            let ok = hours.open_minute >= 0.0
                && hours.open_minute < hours.close_minute
                && hours.close_minute <= MINUTES_PER_DAY;
            if !ok {
                return Err(config_err(format!(
                    "business hours must satisfy 0 <= open < close <= 1440, got [{}, {})",
                    hours.open_minute, hours.close_minute
                )));
            }
        }

        if self.expire_on_failed_renegotiation && self.replenish {
            return Err(config_err(
                "expire_on_failed_renegotiation requires replenish = false",
            ));
        }

        Ok(())
    }
}

fn config_err(msg: impl Into<String>) -> CoreError {
    CoreError::Config(msg.into())
}
