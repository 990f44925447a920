//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous count of simulated **minutes** since the start of the
//! run, held in `SimTime(f64)`.  Inter-arrival gaps drawn from a triangular
//! distribution are fractional, so an integer tick would have to round every
//! sample; minutes as `f64` keep the distribution intact.
//!
//! `SimTime` is totally ordered through [`f64::total_cmp`] so it can key a
//! `BinaryHeap` directly.  The event queue refuses NaN and negative times,
//! which keeps the total order identical to the numeric one for every value
//! that reaches the heap.
//!
//! Minute-of-day arithmetic assumes the run starts at 00:00, so
//! `t % 1440` is the wall-clock minute used by the business-hours gate.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in minutes.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Return the time `minutes` after `self`.
    #[inline]
    pub fn offset(self, minutes: f64) -> SimTime {
        SimTime(self.0 + minutes)
    }

    /// Minutes elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// Minute within the current day, in `[0, 1440)`.
    #[inline]
    pub fn minute_of_day(self) -> f64 {
        self.0.rem_euclid(MINUTES_PER_DAY)
    }

    /// `true` for finite, non-negative timestamps.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.0 / 60.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hhmm(self.0))
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The run's current time.  Owned by the event queue, which is the only
/// thing allowed to move it.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.
    ///
    /// # Panics
    /// Panics in debug mode if `t` is earlier than the current time.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        debug_assert!(t >= self.now, "clock moved backwards: {} -> {}", self.now, t);
        self.now = t;
    }

    /// Break elapsed time into (day, hour, minute) components.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total = self.now.0.max(0.0) as u64;
        let days = total / 1_440;
        let hours = ((total % 1_440) / 60) as u32;
        let minutes = (total % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.now, d, h, m)
    }
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// Render a minute count as `HH:MM`.  Hours are not wrapped at 24, so
/// `format_hhmm(1_500.0)` is `"25:00"`.
pub fn format_hhmm(minutes: f64) -> String {
    let total = minutes.max(0.0);
    let hours = (total / 60.0).floor() as u64;
    let mins = (total % 60.0).floor() as u64;
    format!("{hours:02}:{mins:02}")
}

/// Render an hour count as "2 years, 3 days, 4 hours", omitting zero parts.
pub fn format_span_hours(hours: f64) -> String {
    const HOURS_PER_YEAR: f64 = 365.0 * 24.0;

    let total = hours.max(0.0);
    let years = (total / HOURS_PER_YEAR).floor() as u64;
    let rest = total % HOURS_PER_YEAR;
    let days = (rest / 24.0).floor() as u64;
    let hrs = (rest % 24.0).floor() as u64;

    let plural = |n: u64, unit: &str| {
        if n == 1 { format!("{n} {unit}") } else { format!("{n} {unit}s") }
    };

    let mut parts = Vec::with_capacity(3);
    if years > 0 {
        parts.push(plural(years, "year"));
    }
    if days > 0 {
        parts.push(plural(days, "day"));
    }
    if hrs > 0 {
        parts.push(plural(hrs, "hour"));
    }

    if parts.is_empty() { "0 hours".to_owned() } else { parts.join(", ") }
}
