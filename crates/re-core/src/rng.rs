//! Deterministic simulation RNG streams.
//!
//! # Determinism strategy
//!
//! A run draws randomness from several independent `SmallRng` streams, one
//! per concern, each seeded by:
//!
//!   seed = master_seed XOR ((stream_index + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream indices uniformly across the seed space.
//! This means:
//!
//! - Arrival gaps, property selection and outcome rolls never share state, so
//!   changing how often one of them is consulted leaves the others' sequences
//!   untouched.
//! - Two runs with the same seed and configuration produce the same event
//!   stream.
//! - Independent replications only need different master seeds.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Stable stream slots.  Only append; reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Arrivals = 0,
    Selection = 1,
    Outcomes = 2,
}

impl RngStream {
    pub fn name(self) -> &'static str {
        match self {
            Self::Arrivals => "arrivals",
            Self::Selection => "selection",
            Self::Outcomes => "outcomes",
        }
    }
}

/// Simulation RNG.
///
/// Owned by exactly one simulation instance and used only from its
/// single-threaded event loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// The RNG for one stream of a run seeded with `master_seed`.
    pub fn for_stream(master_seed: u64, stream: RngStream) -> Self {
        let seed = master_seed ^ (stream as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// `true` with probability `p`.
    ///
    /// Implemented as `uniform() < p`, so `p <= 0` never fires and `p >= 1`
    /// always does.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform index into a collection of `len` items.  `None` if empty.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 { None } else { Some(self.0.gen_range(0..len)) }
    }
}
