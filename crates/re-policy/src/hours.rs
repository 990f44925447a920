use re_core::{BusinessHoursConfig, SimTime, MINUTES_PER_DAY};

/// Daily opening window for serving visits.
///
/// `None` inside means "always open".  The run is assumed to start at
/// 00:00, so the minute of day is `t mod 1440`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BusinessHours(Option<BusinessHoursConfig>);

impl BusinessHours {
    pub fn always_open() -> Self {
        Self(None)
    }

    pub fn new(window: Option<BusinessHoursConfig>) -> Self {
        Self(window)
    }

    /// `true` if `t` falls in `[open, close)` of its day.
    pub fn is_open(&self, t: SimTime) -> bool {
        match &self.0 {
            None => true,
            Some(w) => {
                let m = t.minute_of_day();
                w.open_minute <= m && m < w.close_minute
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Open minutes in `elapsed` minutes of simulated time, counted as
    /// `elapsed / 1440 × open_minutes_per_day`.  `None` when always open.
    pub fn open_minutes_in(&self, elapsed: f64) -> Option<f64> {
        self.0
            .map(|w| elapsed / MINUTES_PER_DAY * w.open_minutes_per_day())
    }
}
