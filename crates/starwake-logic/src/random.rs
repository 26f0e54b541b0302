//! Injectable randomness for the encounter pipeline.
//!
//! Every draw the pipeline makes goes through [`RandomSource`], so tests can
//! script exact sequences while the game wires in a real generator.
//!
//! ```
//! use starwake_logic::random::{RandomSource, ScriptedRandom};
//!
//! let mut rng = ScriptedRandom::new(vec![0.25, 0.75]);
//! assert!(rng.chance(0.5));
//! assert!(!rng.chance(0.5));
//! ```

use rand::rngs::ThreadRng;
use rand::Rng;

/// A source of uniform fractions in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Whole number uniformly drawn from `lo..=hi`.
    fn whole(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = f64::from(hi - lo) + 1.0;
        let offset = (self.next_f64() * span).floor() as u32;
        lo + offset.min(hi - lo)
    }

    /// Multiplier drawn from `[1 - variance, 1 + variance)`.
    fn variance(&mut self, variance: f64) -> f64 {
        self.uniform(1.0 - variance, 1.0 + variance)
    }

    /// True when a fresh draw lands below `probability`.
    ///
    /// The probability is not clamped: anything at or above 1.0 always
    /// succeeds, anything at or below 0.0 never does.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    /// Process-wide entropy, used by the game host.
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of fractions, cycling when exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns the same fraction.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        // Keep scripted values inside the documented half-open range.
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
