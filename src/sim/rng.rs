//! Injectable randomness
//!
//! Pattern selection and obstacle sizing draw from a [`RandomSource`] so tests
//! can drive them with a scripted sequence. The live game uses
//! [`AmbientRandom`], a PCG stream seeded from OS entropy.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in [0, 1)
pub trait RandomSource {
    /// Next uniform sample in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in [lo, hi)
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform index in 0..count
    fn index(&mut self, count: usize) -> usize {
        let i = (self.next_f32() * count as f32) as usize;
        i.min(count.saturating_sub(1))
    }
}

/// Unseeded game randomness (fresh entropy every session)
#[derive(Debug, Clone)]
pub struct AmbientRandom {
    rng: Pcg32,
}

impl AmbientRandom {
    pub fn new() -> Self {
        Self {
            rng: Pcg32::seed_from_u64(rand::random()),
        }
    }

    /// Fixed seed, for demos and soak tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Default for AmbientRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for AmbientRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Every draw returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        value.clamp(0.0, 0.999_999)
    }
}
