//! Inter-arrival time generation.

use re_core::{ArrivalConfig, SimRng, TriangularParams};

// ── Triangular ────────────────────────────────────────────────────────────────

/// Triangular distribution sampled by inverse transform.
///
/// With `U ~ U(0, 1)` and `c = (m - a) / (b - a)`:
///
/// ```text
/// U <= c  ⇒  X = a + sqrt(U (b - a)(m - a))
/// U >  c  ⇒  X = b - sqrt((1 - U)(b - a)(b - m))
/// ```
///
/// Exactly one uniform draw per sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    params: TriangularParams,
    c:      f64,
}

impl Triangular {
    /// Bounds must already satisfy `a <= m <= b` with `a < b`
    /// (`PipelineConfig::validate` checks this).
    pub fn new(params: TriangularParams) -> Self {
        Self { params, c: params.mode_fraction() }
    }

    /// Map a uniform `u` in `[0, 1)` to a sample.
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        let TriangularParams { lower: a, mode: m, upper: b } = self.params;
        if u <= self.c {
            a + (u * (b - a) * (m - a)).sqrt()
        } else {
            b - ((1.0 - u) * (b - a) * (b - m)).sqrt()
        }
    }

    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        self.inverse_cdf(rng.uniform())
    }

    pub fn mean(&self) -> f64 {
        self.params.mean()
    }

    pub fn params(&self) -> &TriangularParams {
        &self.params
    }
}

// ── ArrivalGenerator ──────────────────────────────────────────────────────────

/// Produces the gap until the next visit arrival.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArrivalGenerator {
    Fixed(f64),
    Triangular(Triangular),
}

impl ArrivalGenerator {
    pub fn from_config(config: &ArrivalConfig) -> Self {
        match config {
            ArrivalConfig::Fixed { interval_minutes } => ArrivalGenerator::Fixed(*interval_minutes),
            ArrivalConfig::Triangular(params) => {
                ArrivalGenerator::Triangular(Triangular::new(*params))
            }
        }
    }

    /// Minutes until the next arrival.  The fixed policy consumes no draws.
    pub fn next_gap(&self, rng: &mut SimRng) -> f64 {
        match self {
            ArrivalGenerator::Fixed(interval) => *interval,
            ArrivalGenerator::Triangular(t) => t.sample(rng),
        }
    }

    /// Expected gap; the driver stops scheduling arrivals once fewer than
    /// this many minutes remain before the horizon.
    pub fn mean_interval(&self) -> f64 {
        match self {
            ArrivalGenerator::Fixed(interval) => *interval,
            ArrivalGenerator::Triangular(t) => t.mean(),
        }
    }
}
