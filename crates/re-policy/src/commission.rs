//! Minimum acceptable commission after a number of renegotiations.
//!
//! Each renegotiation concedes part of the gap between the starting and the
//! floor commission.  Step `i` (1-based) weighs `i`, so later concessions
//! are larger:
//!
//! ```text
//! rate(N) = start - (Σ_{i=1..min(N, steps)} i) / (Σ_{i=1..steps} i) × (start - end)
//! ```
//!
//! | N | default rate |
//! |---|--------------|
//! | 0 | 3.600 %      |
//! | 3 | 3.314 %      |
//! | 6 | 2.600 %      |

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommissionSchedule {
    pub start: f64,
    pub end:   f64,
    pub steps: u32,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self { start: 0.036, end: 0.026, steps: 6 }
    }
}

impl CommissionSchedule {
    /// Commission floor after `renegotiations` rounds.
    pub fn minimum_rate(&self, renegotiations: u32) -> f64 {
        if self.steps == 0 {
            return self.start;
        }
        let weight_sum = |n: u32| f64::from(n) * f64::from(n + 1) / 2.0;
        let taken = weight_sum(renegotiations.min(self.steps));
        self.start - taken / weight_sum(self.steps) * (self.start - self.end)
    }
}
