//! Random sources for placeholder model scores.
//!
//! The keyword classifier has no real model behind it, so its confidence
//! and similar-issue count are sampled. Inject [`SeededRandom`] or
//! [`FixedRandom`] wherever those values must be reproducible.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform samples in `[0, 1)`
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;

    /// Uniform real in `[min, max]`. Returns `min` for an empty or NaN range.
    fn uniform(&self, min: f64, max: f64) -> f64 {
        if !(min <= max) {
            return min;
        }
        (min + self.next_unit() * (max - min)).clamp(min, max)
    }

    /// Uniform integer in `[min, max]`, covering the full `u32` range
    fn uniform_int(&self, min: u32, max: u32) -> u32 {
        let (min, max) = (u64::from(min), u64::from(max));
        let span = (max.saturating_sub(min) + 1) as f64;
        let offset = (self.next_unit() * span).floor() as u64;
        // Bounded by `max`, so the cast back is lossless
        (min + offset).min(max) as u32
    }
}

/// Thread-local generator, non-deterministic
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Deterministic generator seeded once at construction
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.rng.lock().gen::<f64>()
    }
}

/// Always returns the same sample
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(f64);

impl FixedRandom {
    /// `value` is clamped into `[0, 1)`; non-finite values become 0
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0 - f64::EPSILON))
        } else {
            Self(0.0)
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.0
    }
}
